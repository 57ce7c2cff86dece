//! Project handlers - create, list, open, refresh and delete.

mod create_project;
mod delete_project;
mod open_project;

pub use create_project::{CreateProjectCommand, CreateProjectHandler};
pub use delete_project::DeleteProjectHandler;
pub use open_project::{
    ListProjectsHandler, OpenProjectHandler, OpenProjectQuery, RefreshProjectHandler,
};
