//! Main Application
//!
//! The App owns the TUI lifecycle:
//! - Event loop (keyboard, mouse)
//! - ApiClient for the visualizer service
//! - VisualizerView state for rendering
//!
//! Submitting spawns exactly one request task; its outcome comes back over
//! an mpsc channel and is applied to the view before the next frame. The
//! view's busy flag keeps a second request from starting while one is in
//! flight.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthChar;

use crate::api::{ApiClient, ServiceOrigin};
use crate::theme;
use crate::view::{failure_message, Field, NoticeLevel, SessionEvent, VisualizerView};
use crate::widgets::{TreeBlock, TreeBlockState};

/// Lines scrolled per PageUp/PageDown
const TREE_PAGE: i32 = 10;

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Client for the visualizer service
    client: ApiClient,
    /// All visualizer UI state
    view: VisualizerView,
    /// Scroll state of the tree panel
    tree_scroll: TreeBlockState,
    /// Outcome of the startup reachability probe
    service_reachable: Option<bool>,
    /// Sender handed to spawned request tasks
    events_tx: mpsc::Sender<SessionEvent>,
    /// Receiver drained every frame
    events_rx: mpsc::Receiver<SessionEvent>,
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel(16);
        Self {
            running: true,
            client: ApiClient::new(ServiceOrigin::from_env()),
            view: VisualizerView::new(),
            tree_scroll: TreeBlockState::default(),
            service_reachable: None,
            events_tx,
            events_rx,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Probe the service once so the status line can warn early
        self.spawn_health_check();

        // Render initial frame immediately so the user sees the form
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key)
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse),
                            _ => {}
                        }
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(100)) => {}
            }

            // Apply outcomes of spawned request tasks
            while let Ok(event) = self.events_rx.try_recv() {
                self.apply_session_event(event);
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: event::KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Save the generated artifacts to the current directory
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_results();
            }

            // Submit
            KeyCode::Enter => self.submit(),

            // Field focus
            KeyCode::Tab | KeyCode::Down => self.view.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.view.focus_prev(),

            // Editing
            KeyCode::Backspace => self.view.backspace(),
            KeyCode::Char(c) => self.view.push_char(c),

            // Tree panel scrolling
            KeyCode::PageUp => self.tree_scroll.scroll(-TREE_PAGE),
            KeyCode::PageDown => self.tree_scroll.scroll(TREE_PAGE),
            KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.tree_scroll.scroll_to_top();
            }

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.tree_scroll.scroll(-3),
            MouseEventKind::ScrollDown => self.tree_scroll.scroll(3),
            _ => {}
        }
    }

    /// Start the single in-flight generation request
    fn submit(&mut self) {
        let Some(submission) = self.view.begin_submission() else {
            return;
        };
        self.tree_scroll.scroll_to_top();

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match client
                .generate(&submission.folder_path, &submission.output_filename)
                .await
            {
                Ok(data) => SessionEvent::Generated {
                    stem: submission.output_filename,
                    image_url: client.absolute_url(&data.image_url),
                    text_url: client.absolute_url(&data.text_url),
                    tree: data.tree_structure,
                },
                Err(err) => SessionEvent::GenerateFailed {
                    message: failure_message(&err),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    /// Fetch the generated image and text file and write them to disk
    fn save_results(&mut self) {
        let Some(stem) = self.view.begin_download() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match save_artifacts(&client, &stem).await {
                Ok((image_path, text_path)) => SessionEvent::ResultsSaved {
                    image_path,
                    text_path,
                },
                Err(err) => SessionEvent::SaveFailed {
                    message: err.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    /// Probe service reachability without blocking the loop
    fn spawn_health_check(&self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let reachable = client.health_check().await;
            let _ = tx.send(SessionEvent::HealthChecked { reachable }).await;
        });
    }

    /// Route one session event to the right state
    fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::HealthChecked { reachable } => {
                if !reachable {
                    tracing::warn!(
                        "visualizer service unreachable at {}",
                        self.client.origin().base_url()
                    );
                }
                self.service_reachable = Some(reachable);
            }
            SessionEvent::Generated { .. } => {
                self.tree_scroll.scroll_to_top();
                self.view.apply_event(event);
            }
            _ => self.view.apply_event(event),
        }
    }

    // === Rendering ===

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(4), // form + hint
                Constraint::Length(1), // status
                Constraint::Min(0),    // results
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_form(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
        self.render_results(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(
                " Folder Structure Visualizer",
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.client.origin().base_url()),
                Style::default().fg(theme::DIM_GRAY),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let value_width = (area.width as usize).saturating_sub(22);
        let mut lines = Vec::new();

        for field in [Field::FolderPath, Field::OutputFilename] {
            let focused = self.view.focus() == field;
            let marker = if focused { " > " } else { "   " };
            let value = visible_tail(self.view.field_value(field), value_width);

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme::ACCENT)),
                Span::styled(
                    format!("{:<17}", field.label()),
                    Style::default().fg(theme::DIM_GRAY),
                ),
                Span::styled(
                    value.to_string(),
                    Style::default().fg(theme::INPUT_GREEN),
                ),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().fg(theme::INPUT_GREEN)));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        let hint = if self.view.result().is_some() {
            " Enter generate | Tab switch field | Ctrl+S save results | PgUp/PgDn scroll | Esc quit"
        } else {
            " Enter generate | Tab switch field | Esc quit"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(theme::DIM_GRAY),
        )));

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let (text, color) = if let Some(error) = self.view.error() {
            (format!(" Error: {error}"), theme::ERROR_RED)
        } else if let Some(notice) = self.view.notice() {
            let color = match notice.level {
                NoticeLevel::Info => theme::SUCCESS_GREEN,
                NoticeLevel::Error => theme::ERROR_RED,
            };
            (format!(" {}", notice.text), color)
        } else if self.view.is_downloading() {
            (" Saving results...".to_string(), theme::DIM_GRAY)
        } else {
            let mut text = format!(" {}", self.view.phase().description());
            if self.service_reachable == Some(false) {
                text.push_str(" | service unreachable");
            }
            (text, theme::DIM_GRAY)
        };

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))),
            area,
        );
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let Self {
            view, tree_scroll, ..
        } = self;
        let Some(bundle) = view.result() else {
            return;
        };
        if area.height < 5 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let info = vec![
            Line::from(Span::styled(
                " Folder Structure Visualization",
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(" Image: ", Style::default().fg(theme::DIM_GRAY)),
                Span::raw(bundle.image_url.clone()),
            ]),
            Line::from(vec![
                Span::styled(" Text:  ", Style::default().fg(theme::DIM_GRAY)),
                Span::raw(bundle.text_url.clone()),
            ]),
            Line::from(Span::styled(
                " Text Representation",
                Style::default().fg(theme::ACCENT),
            )),
        ];
        frame.render_widget(Paragraph::new(info), chunks[0]);

        let tree = TreeBlock::new(&bundle.tree)
            .style(Style::default().fg(theme::TREE_TEXT))
            .connector_style(Style::default().fg(theme::TREE_CONNECTOR));
        frame.render_stateful_widget(tree, chunks[1], tree_scroll);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Download both artifacts and write them into the working directory
async fn save_artifacts(client: &ApiClient, stem: &str) -> anyhow::Result<(String, String)> {
    let image_name = format!("{stem}.png");
    let image = client.fetch_image(&image_name).await?;
    tokio::fs::write(&image_name, &image).await?;

    let text = client.fetch_text(stem).await?;
    let text_name = format!("{stem}.txt");
    tokio::fs::write(&text_name, text).await?;

    Ok((image_name, text_name))
}

/// Trailing slice of `value` that fits in `max` display columns, so long
/// paths keep their most recent segments visible while editing
fn visible_tail(value: &str, max: usize) -> &str {
    let mut width = 0;
    let mut start = value.len();
    for (idx, ch) in value.char_indices().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        start = idx;
    }
    &value[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_visible_tail_short_value_unchanged() {
        assert_eq!(visible_tail("/tmp", 10), "/tmp");
        assert_eq!(visible_tail("", 10), "");
    }

    #[test]
    fn test_visible_tail_keeps_trailing_segments() {
        assert_eq!(visible_tail("/home/user/projects/app", 8), "ects/app");
    }

    #[test]
    fn test_visible_tail_zero_width() {
        assert_eq!(visible_tail("/tmp", 0), "");
    }
}
