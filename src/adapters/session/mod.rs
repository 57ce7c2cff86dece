//! Session provider adapters.

mod static_provider;

pub use static_provider::{SharedSessionProvider, StaticSessionProvider};
