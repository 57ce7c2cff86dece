//! Project module - the content lifecycle of a drafting project.
//!
//! - `Outline` holds the ordered section titles (outline store)
//! - `GeneratedContent` / `Section` hold generated sections (content store)
//! - `ProjectStatus` is the lifecycle state machine
//! - `RefinementRequest` describes single-section refinements
//! - `ExportGate` decides export eligibility

mod aggregate;
mod content;
mod errors;
mod export;
mod outline;
mod project_type;
mod refinement;
mod section;
mod status;

pub use aggregate::{Project, ProjectSummary};
pub use content::GeneratedContent;
pub use errors::ProjectError;
pub use export::{ExportGate, ExportRequest};
pub use outline::Outline;
pub use project_type::ProjectType;
pub use refinement::{Feedback, Instruction, RefinementRequest, DISLIKE_INSTRUCTION};
pub use section::{Section, SectionFeedback, SectionRevision, SectionRewrite};
pub use status::ProjectStatus;
