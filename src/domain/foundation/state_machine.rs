//! State machine trait for lifecycle status enums.
//!
//! Status enums describe their legal edges once; callers get validated
//! transitions and terminal-state checks from the trait.

use std::fmt;
use thiserror::Error;

/// Raised when a status change is not an edge of the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ProjectStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Empty, Outlined) | (Outlined, Generating) /* ... */)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> { /* ... */ }
/// }
///
/// let next = status.transition_to(ProjectStatus::Generating)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Display {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: self.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Closed,
        Open,
        Removed,
    }

    impl fmt::Display for Door {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Door::Closed => vec![Door::Open, Door::Removed],
                Door::Open => vec![Door::Closed, Door::Removed],
                Door::Removed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_edge() {
        assert_eq!(Door::Closed.transition_to(Door::Open), Ok(Door::Open));
    }

    #[test]
    fn transition_to_reports_both_states_on_invalid_edge() {
        let err = Door::Removed.transition_to(Door::Open).unwrap_err();
        assert_eq!(err.from, "Removed");
        assert_eq!(err.to, "Open");
        assert_eq!(err.to_string(), "Cannot transition from Removed to Open");
    }

    #[test]
    fn is_terminal_only_for_states_without_edges() {
        assert!(Door::Removed.is_terminal());
        assert!(!Door::Closed.is_terminal());
        assert!(!Door::Open.is_terminal());
    }
}
