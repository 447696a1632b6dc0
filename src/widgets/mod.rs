//! Render-only Widgets
//!
//! Presentational pieces with no business logic: the scrollable tree
//! panel used by the app, and a line-numbered tree view.

mod tree_block;
mod tree_view;

pub use tree_block::{TreeBlock, TreeBlockState};
pub use tree_view::TreeView;
