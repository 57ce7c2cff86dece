//! Adapters - Implementations of port interfaces.
//!
//! - `api` - reqwest clients for the backend REST API
//! - `memory` - In-process repository and scripted AI collaborators
//! - `session` - Session token providers
//! - `export` - Local storage for exported files

pub mod api;
pub mod export;
pub mod memory;
pub mod session;
