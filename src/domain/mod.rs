//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, state machine)
//! - `project` - Project snapshot, outline, sections and lifecycle rules

pub mod foundation;
pub mod project;
