//! ProjectStatus - the lifecycle state machine of a project.
//!
//! ```text
//!  Empty ──add──▶ Outlined ──generate──▶ Generating ──ok──▶ Ready ◀─┐
//!    ▲              │  ▲                    │  ▲              │ │   │ refine
//!    └─remove last──┘  └──────failure───────┘  └──regenerate──┘ └───┘
//!                      ▲                                        │
//!                      └───────────── discard content ──────────┘
//!  any ──delete──▶ Deleted
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle state of a project.
///
/// `Empty`, `Outlined` and `Ready` are derived from the persisted record;
/// `Generating` and `Deleted` exist only on a client-side project handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Empty,
    Outlined,
    Generating,
    Ready,
    Deleted,
}

impl ProjectStatus {
    /// Derives the resting state from the persisted shape of a project.
    pub fn derive(outline_len: usize, has_content: bool) -> Self {
        if has_content {
            ProjectStatus::Ready
        } else if outline_len == 0 {
            ProjectStatus::Empty
        } else {
            ProjectStatus::Outlined
        }
    }

    /// Outline edits are allowed only while no content exists.
    pub fn allows_outline_edit(&self) -> bool {
        matches!(self, ProjectStatus::Empty | ProjectStatus::Outlined)
    }

    /// Section-level operations (refine, feedback, notes) need content.
    pub fn allows_section_edit(&self) -> bool {
        matches!(self, ProjectStatus::Ready)
    }

    /// Resting state after an outline edit leaves `len` entries.
    pub fn after_outline_edit(len: usize) -> Self {
        Self::derive(len, false)
    }
}

impl StateMachine for ProjectStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ProjectStatus::*;
        matches!(
            (self, target),
            (Empty, Outlined)
                | (Outlined, Outlined)
                | (Outlined, Empty)
                | (Outlined, Generating)
                | (Generating, Ready)
                | (Generating, Outlined)
                | (Ready, Ready)
                | (Ready, Generating)
                | (Ready, Outlined)
                | (Ready, Empty)
                | (Empty, Deleted)
                | (Outlined, Deleted)
                | (Generating, Deleted)
                | (Ready, Deleted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ProjectStatus::*;
        match self {
            Empty => vec![Outlined, Deleted],
            Outlined => vec![Outlined, Empty, Generating, Deleted],
            Generating => vec![Ready, Outlined, Deleted],
            Ready => vec![Ready, Generating, Outlined, Empty, Deleted],
            Deleted => vec![],
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Empty => "Empty",
            ProjectStatus::Outlined => "Outlined",
            ProjectStatus::Generating => "Generating",
            ProjectStatus::Ready => "Ready",
            ProjectStatus::Deleted => "Deleted",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProjectStatus::*;

    const ALL: [ProjectStatus; 5] = [Empty, Outlined, Generating, Ready, Deleted];

    #[test]
    fn derive_maps_persisted_shape() {
        assert_eq!(ProjectStatus::derive(0, false), Empty);
        assert_eq!(ProjectStatus::derive(3, false), Outlined);
        assert_eq!(ProjectStatus::derive(3, true), Ready);
        assert_eq!(ProjectStatus::derive(0, true), Ready);
    }

    #[test]
    fn empty_cannot_generate() {
        assert!(!Empty.can_transition_to(&Generating));
    }

    #[test]
    fn generation_failure_returns_to_outlined() {
        assert!(Generating.can_transition_to(&Outlined));
        assert!(Generating.can_transition_to(&Ready));
        assert!(!Generating.can_transition_to(&Empty));
    }

    #[test]
    fn ready_refinement_is_a_self_loop() {
        assert!(Ready.can_transition_to(&Ready));
    }

    #[test]
    fn every_live_state_can_be_deleted() {
        for status in [Empty, Outlined, Generating, Ready] {
            assert!(status.can_transition_to(&Deleted), "{} -> Deleted", status);
        }
    }

    #[test]
    fn deleted_is_terminal() {
        assert!(Deleted.is_terminal());
        for target in ALL {
            assert!(!Deleted.can_transition_to(&target));
        }
    }

    #[test]
    fn outline_edits_blocked_once_content_exists() {
        assert!(Empty.allows_outline_edit());
        assert!(Outlined.allows_outline_edit());
        assert!(!Generating.allows_outline_edit());
        assert!(!Ready.allows_outline_edit());
        assert!(!Deleted.allows_outline_edit());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(serde_json::to_string(&Generating).unwrap(), "\"generating\"");
    }
}
