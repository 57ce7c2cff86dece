//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped
//! by the part of the project lifecycle they drive.

pub mod content;
pub mod export;
pub mod outline;
pub mod project;
pub mod refinement;

mod section_update;

pub use content::{
    DiscardContentHandler, GenerateContentCommand, GenerateContentHandler, GenerateContentResult,
    GenerationMode, SaveNoteCommand, SaveNoteHandler,
};
pub use export::{default_filename, ExportProjectHandler};
pub use outline::{
    EditOutlineCommand, EditOutlineHandler, EditOutlineResult, OutlineEdit, SuggestOutlineCommand,
    SuggestOutlineHandler,
};
pub use project::{
    CreateProjectCommand, CreateProjectHandler, DeleteProjectHandler, ListProjectsHandler,
    OpenProjectHandler, OpenProjectQuery, RefreshProjectHandler,
};
pub use refinement::{
    GiveFeedbackCommand, RefineSectionCommand, RefinementHandler, RefinementResult,
};
