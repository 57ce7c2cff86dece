//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the state machine trait
//! that form the vocabulary of the drafting domain.

mod auth;
mod command;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::SessionToken;
pub use command::CommandMetadata;
pub use errors::{ErrorCode, ValidationError};
pub use ids::{CorrelationId, ProjectId};
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;
