//! TreeBlock Widget
//!
//! A borderless, scrollable panel for the tree text. The leading run of
//! box-drawing connectors on each line gets its own style so the
//! hierarchy reads at a glance.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Scroll state for a tree panel
#[derive(Default)]
pub struct TreeBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total content lines after wrapping
    pub total_lines: usize,
}

impl TreeBlockState {
    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: i32) {
        let new_offset = self.scroll_offset as i32 + delta;
        self.scroll_offset = new_offset.max(0) as usize;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }
}

/// A borderless, scrollable tree panel
pub struct TreeBlock<'a> {
    content: &'a str,
    style: Style,
    connector_style: Style,
}

impl<'a> TreeBlock<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            connector_style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style for the leading box-drawing connectors of each line
    pub fn connector_style(mut self, style: Style) -> Self {
        self.connector_style = style;
        self
    }
}

/// Byte length of the leading run of connector characters and spaces
fn connector_prefix_len(line: &str) -> usize {
    let mut len = 0;
    for ch in line.chars() {
        match ch {
            '│' | '├' | '└' | '─' | ' ' => len += ch.len_utf8(),
            _ => break,
        }
    }
    len
}

impl<'a> StatefulWidget for TreeBlock<'a> {
    type State = TreeBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Wrap each content line to the panel width
        let wrapped: Vec<String> = self
            .content
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, area.width as usize)
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect();

        state.total_lines = wrapped.len();

        // Clamp scroll
        let max_scroll = state.total_lines.saturating_sub(area.height as usize);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        // Render visible lines, connectors first
        for (i, line) in wrapped
            .iter()
            .skip(state.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            let split = connector_prefix_len(line);
            let (connectors, entry) = line.split_at(split);
            buf.set_string(area.x, y, connectors, self.connector_style);
            buf.set_string(area.x + connectors.width() as u16, y, entry, self.style);
        }
    }
}
