//! Theme and Colors
//!
//! treescope's palette: a restrained terminal look with a single accent
//! for headings and focus markers, green for user input, and dim shades
//! for chrome.

use ratatui::style::Color;

// ============================================================================
// UI Colors
// ============================================================================

/// Headings and focus markers
pub const ACCENT: Color = Color::Cyan;

/// User input text
pub const INPUT_GREEN: Color = Color::Rgb(130, 220, 130);

/// Labels, hints, separators
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Inline error text
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Saved-results confirmation
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

// ============================================================================
// Tree Panel
// ============================================================================

/// Branch connectors; matches the #666666 the service draws graph edges with
pub const TREE_CONNECTOR: Color = Color::Rgb(102, 102, 102);

/// Entry names in the tree
pub const TREE_TEXT: Color = Color::Rgb(220, 220, 220);

/// Line-number gutter in the tree view
pub const GUTTER_GRAY: Color = Color::Rgb(80, 80, 80);
