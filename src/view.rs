//! Visualizer View State
//!
//! All UI state for the visualizer lives here: the two input fields, the
//! submission phase, the result bundle, and the error message. The view is
//! a pure state machine; it performs no I/O. The app shell feeds it
//! `SessionEvent`s produced by spawned request tasks and renders whatever
//! it holds.
//!
//! Phases: Idle -> Submitting -> Success or Failed. Both terminal phases
//! accept a new submission. Only one request may be in flight at a time;
//! `begin_submission` and `begin_download` refuse while busy.

use crate::api::ApiError;

/// Message shown when a failure carries no service-provided detail
pub const GENERIC_FAILURE: &str = "Failed to generate folder structure";

/// Initial value of the output filename field
pub const DEFAULT_OUTPUT_STEM: &str = "folder_structure";

/// Reduce an API error to the inline message the user sees
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Service {
            detail: Some(detail),
            ..
        } => detail.clone(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// Submission phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet
    Idle,
    /// A generation request is in flight
    Submitting,
    /// Last submission produced a result bundle
    Success,
    /// Last submission failed
    Failed,
}

impl Phase {
    /// Short status-line description
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Submitting => "Generating...",
            Phase::Success => "Done",
            Phase::Failed => "Failed",
        }
    }

    /// Whether this phase ends a submission
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Success | Phase::Failed)
    }
}

/// The editable input fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    FolderPath,
    OutputFilename,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FolderPath => "Folder Path",
            Field::OutputFilename => "Output Filename",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Field::FolderPath => Field::OutputFilename,
            Field::OutputFilename => Field::FolderPath,
        }
    }
}

/// Events sent back to the view from spawned request tasks
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// Generation succeeded
    Generated {
        stem: String,
        image_url: String,
        text_url: String,
        tree: String,
    },
    /// Generation failed; message is already user-readable
    GenerateFailed { message: String },
    /// Both artifacts were written to disk
    ResultsSaved {
        image_path: String,
        text_path: String,
    },
    /// Download or write failed
    SaveFailed { message: String },
    /// Startup reachability probe finished
    HealthChecked { reachable: bool },
}

/// Parameters of one generation request, passed through verbatim
#[derive(Clone, Debug)]
pub struct Submission {
    pub folder_path: String,
    pub output_filename: String,
}

/// A successful generation result
#[derive(Clone, Debug)]
pub struct ResultBundle {
    /// Output filename stem the submission used
    pub stem: String,
    /// Absolute URL of the rendered image
    pub image_url: String,
    /// Absolute URL of the tree text file
    pub text_url: String,
    /// The tree as plain text
    pub tree: String,
}

/// A transient status-line notice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

impl Notice {
    fn info(text: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            text,
        }
    }

    fn error(text: String) -> Self {
        Self {
            level: NoticeLevel::Error,
            text,
        }
    }
}

/// The visualizer view state
#[derive(Debug)]
pub struct VisualizerView {
    folder_path: String,
    output_filename: String,
    focus: Field,
    phase: Phase,
    result: Option<ResultBundle>,
    error: Option<String>,
    notice: Option<Notice>,
    downloading: bool,
}

impl Default for VisualizerView {
    fn default() -> Self {
        Self {
            folder_path: String::new(),
            output_filename: DEFAULT_OUTPUT_STEM.to_string(),
            focus: Field::FolderPath,
            phase: Phase::Idle,
            result: None,
            error: None,
            notice: None,
            downloading: false,
        }
    }
}

impl VisualizerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn result(&self) -> Option<&ResultBundle> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Current text of a field
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::FolderPath => &self.folder_path,
            Field::OutputFilename => &self.output_filename,
        }
    }

    /// Whether a request (generation or download) is in flight
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Submitting || self.downloading
    }

    /// Whether the in-flight request is a download
    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    /// Whether the submit trigger is currently enabled
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.folder_path.trim().is_empty()
    }

    // === Field editing ===

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        // Two fields, so prev == next
        self.focus = self.focus.next();
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            Field::FolderPath => self.folder_path.push(c),
            Field::OutputFilename => self.output_filename.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::FolderPath => {
                self.folder_path.pop();
            }
            Field::OutputFilename => {
                self.output_filename.pop();
            }
        }
    }

    // === Transitions ===

    /// Start a submission: clears the prior error and result bundle and
    /// enters Submitting. Refused while busy or with an empty folder path.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.result = None;
        self.notice = None;
        self.phase = Phase::Submitting;
        Some(Submission {
            folder_path: self.folder_path.clone(),
            output_filename: self.output_filename.clone(),
        })
    }

    /// Start a download of the current result bundle. Refused while busy
    /// or without a bundle. Returns the output filename stem.
    pub fn begin_download(&mut self) -> Option<String> {
        if self.is_busy() {
            return None;
        }
        let stem = self.result.as_ref()?.stem.clone();
        self.notice = None;
        self.downloading = true;
        Some(stem)
    }

    /// Apply the outcome of a spawned request task
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Generated {
                stem,
                image_url,
                text_url,
                tree,
            } => {
                self.result = Some(ResultBundle {
                    stem,
                    image_url,
                    text_url,
                    tree,
                });
                self.phase = Phase::Success;
            }
            SessionEvent::GenerateFailed { message } => {
                self.error = Some(message);
                self.phase = Phase::Failed;
            }
            SessionEvent::ResultsSaved {
                image_path,
                text_path,
            } => {
                self.downloading = false;
                self.notice = Some(Notice::info(format!("Saved {image_path} and {text_path}")));
            }
            SessionEvent::SaveFailed { message } => {
                self.downloading = false;
                self.notice = Some(Notice::error(format!("Save failed: {message}")));
            }
            // Reachability is an app-shell concern
            SessionEvent::HealthChecked { .. } => {}
        }
    }
}
