//! State management for the listing browser.
//!
//! This module provides the cursor state of the listing view and the draft
//! used while the user types text filter criteria.

mod filter_draft;
mod list_state;

pub use filter_draft::{DraftField, FilterDraft};
pub use list_state::ListState;
