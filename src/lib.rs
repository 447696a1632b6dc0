//! treescope - Terminal client for the folder structure visualizer service
//!
//! Submits a folder path to the visualizer service, then displays the
//! generated image reference and the textual tree of that folder.
//!
//! # Architecture
//!
//! - **Api**: thin wrapper over the service's three HTTP operations
//! - **View**: the visualizer state machine (idle, submitting, success, failed)
//! - **Widgets**: render-only tree panels
//! - **Theme**: palette constants

pub mod api;
pub mod app;
pub mod theme;
pub mod view;
pub mod widgets;

pub use app::App;
