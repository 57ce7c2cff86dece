//! Refinement handlers - per-section rewrites and feedback.

mod refine_section;

pub use refine_section::{
    GiveFeedbackCommand, RefineSectionCommand, RefinementHandler, RefinementResult,
};
