//! Session provider port.
//!
//! The core only asks for the current token. Issuing, storing and
//! refreshing tokens belong to the surrounding application.

use crate::domain::foundation::SessionToken;

/// Supplies the token of the current session, if any.
///
/// # Contract
///
/// - Return `None` when there is no usable session; the core then refuses
///   the operation with `AuthRequired` before any remote call.
/// - Never block: this is read on every operation.
pub trait SessionProvider: Send + Sync {
    fn current_token(&self) -> Option<SessionToken>;
}
