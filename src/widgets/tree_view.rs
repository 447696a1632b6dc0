//! TreeView Widget
//!
//! Displays a tree-structure blob with a line-number gutter, the terminal
//! equivalent of a read-only code viewer. Holds no state and is not part
//! of the submission flow.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// Line-numbered tree display
pub struct TreeView<'a> {
    content: &'a str,
    number_style: Style,
    text_style: Style,
}

impl<'a> TreeView<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            number_style: Style::default(),
            text_style: Style::default(),
        }
    }

    pub fn number_style(mut self, style: Style) -> Self {
        self.number_style = style;
        self
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }
}

/// Leading slice of `text` that fits in `max` display columns
fn clip_to_width(text: &str, max: usize) -> &str {
    let mut width = 0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        end = idx + ch.len_utf8();
    }
    &text[..end]
}

impl<'a> Widget for TreeView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let line_count = self.content.lines().count().max(1);
        let gutter = line_count.to_string().len();
        let text_width = (area.width as usize).saturating_sub(gutter + 1);

        for (i, line) in self.content.lines().take(area.height as usize).enumerate() {
            let y = area.y + i as u16;
            let number = format!("{:>gutter$} ", i + 1);
            buf.set_string(area.x, y, &number, self.number_style);
            buf.set_string(
                area.x + (gutter + 1) as u16,
                y,
                clip_to_width(line, text_width),
                self.text_style,
            );
        }
    }
}
