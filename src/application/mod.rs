//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Every operation takes an explicit `SessionContext` and, where it acts on
//! an existing project, a `ProjectHandle`.

mod context;
pub mod handlers;
mod service;

pub use context::{ProjectHandle, SessionContext};
pub use handlers::*;
pub use service::{Collaborators, DraftingService};
