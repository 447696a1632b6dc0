//! Integration Tests for the Submission Flow
//!
//! These tests drive the visualizer view the way the app shell does:
//! a submission yields request parameters, a spawned task reports the
//! outcome over an mpsc channel, and the event is applied to the view
//! before the next frame.
//!
//! # Test Coverage
//!
//! 1. **Success Flow**: submit, receive a result bundle, display it
//! 2. **Failure Flow**: service detail and fallback messages
//! 3. **In-flight Guard**: the trigger stays disabled until resolution
//! 4. **Download Flow**: saving artifacts keeps the bundle intact

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use treescope::api::{ApiClient, ApiError};
use treescope::view::{
    failure_message, Phase, SessionEvent, Submission, VisualizerView, GENERIC_FAILURE,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Put a view into the Submitting phase and hand back the parameters,
/// the way App::submit does
fn submit(view: &mut VisualizerView, folder_path: &str) -> Submission {
    for c in folder_path.chars() {
        view.push_char(c);
    }
    view.begin_submission().expect("submission accepted")
}

/// Simulate the spawned request task resolving successfully
fn spawn_success(tx: mpsc::Sender<SessionEvent>, submission: Submission) {
    let client = ApiClient::default();
    tokio::spawn(async move {
        let event = SessionEvent::Generated {
            stem: submission.output_filename,
            image_url: client.absolute_url("/static/x.png"),
            text_url: client.absolute_url("/static/x.txt"),
            tree: "root\n  a\n  b".to_string(),
        };
        let _ = tx.send(event).await;
    });
}

/// Simulate the spawned request task rejecting
fn spawn_failure(tx: mpsc::Sender<SessionEvent>, err: ApiError) {
    tokio::spawn(async move {
        let event = SessionEvent::GenerateFailed {
            message: failure_message(&err),
        };
        let _ = tx.send(event).await;
    });
}

// ============================================================================
// Success Flow
// ============================================================================

#[tokio::test]
async fn success_flow_displays_bundle() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut view = VisualizerView::new();

    let submission = submit(&mut view, "/tmp/project");
    assert!(view.is_busy());
    spawn_success(tx, submission);

    let event = timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("outcome before timeout")
        .expect("channel open");
    view.apply_event(event);

    assert_eq!(view.phase(), Phase::Success);
    assert!(!view.is_busy());

    let bundle = view.result().expect("bundle stored");
    assert_eq!(bundle.image_url, "http://localhost:8000/static/x.png");
    assert_eq!(bundle.tree, "root\n  a\n  b");
}

#[tokio::test]
async fn resubmission_clears_previous_image_first() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut view = VisualizerView::new();

    let submission = submit(&mut view, "/tmp/project");
    spawn_success(tx.clone(), submission);
    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);
    assert!(view.result().is_some());

    // The prior image disappears the moment a new submission starts
    let submission = view.begin_submission().expect("terminal phase resubmits");
    assert!(view.result().is_none());
    assert!(view.error().is_none());

    spawn_success(tx, submission);
    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);
    assert!(view.result().is_some());
}

// ============================================================================
// Failure Flow
// ============================================================================

#[tokio::test]
async fn failure_flow_surfaces_service_detail() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut view = VisualizerView::new();

    submit(&mut view, "/missing");
    spawn_failure(
        tx,
        ApiError::Service {
            status: reqwest::StatusCode::BAD_REQUEST,
            detail: Some("path not found".to_string()),
        },
    );

    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);

    assert_eq!(view.phase(), Phase::Failed);
    assert!(!view.is_busy());
    assert_eq!(view.error(), Some("path not found"));
}

#[tokio::test]
async fn failure_flow_falls_back_to_generic_message() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut view = VisualizerView::new();

    submit(&mut view, "/missing");
    spawn_failure(
        tx,
        ApiError::Service {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        },
    );

    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);

    assert_eq!(view.error(), Some(GENERIC_FAILURE));
}

// ============================================================================
// In-flight Guard
// ============================================================================

#[tokio::test]
async fn trigger_disabled_until_resolution() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut view = VisualizerView::new();

    let submission = submit(&mut view, "/tmp/project");

    // Disabled for the whole in-flight window
    assert!(!view.can_submit());
    assert!(view.begin_submission().is_none());

    spawn_success(tx, submission);
    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);

    // Re-enabled after the terminal phase
    assert!(view.can_submit());
}

// ============================================================================
// Download Flow
// ============================================================================

#[tokio::test]
async fn download_flow_reports_saved_paths() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut view = VisualizerView::new();

    let submission = submit(&mut view, "/tmp/project");
    spawn_success(tx.clone(), submission);
    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);

    let stem = view.begin_download().expect("download accepted");
    assert_eq!(stem, "folder_structure");
    assert!(view.is_busy());

    tokio::spawn(async move {
        let _ = tx
            .send(SessionEvent::ResultsSaved {
                image_path: format!("{stem}.png"),
                text_path: format!("{stem}.txt"),
            })
            .await;
    });

    let event = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
    view.apply_event(event);

    assert!(!view.is_busy());
    assert!(view.result().is_some(), "bundle survives a download");
    let notice = view.notice().expect("saved notice");
    assert!(notice.text.contains("folder_structure.png"));
}
