//! Outline handlers - edits and AI suggestions.

mod edit_outline;
mod suggest_outline;

pub use edit_outline::{EditOutlineCommand, EditOutlineHandler, EditOutlineResult, OutlineEdit};
pub use suggest_outline::{SuggestOutlineCommand, SuggestOutlineHandler};
