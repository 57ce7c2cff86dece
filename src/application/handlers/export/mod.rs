//! Export handlers.

mod export_project;

pub use export_project::{default_filename, ExportProjectHandler};
