//! Export Sink Port - where exported files end up.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::ExportedDocument;

/// Errors from storing an exported file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportSinkError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl ExportSinkError {
    pub fn io(message: impl Into<String>) -> Self {
        ExportSinkError::Io(message.into())
    }
}

/// Port for persisting an exported document locally.
///
/// # Contract
///
/// - Either the whole file is written or nothing is visible
/// - Returns the final location of the file
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn store(&self, document: &ExportedDocument) -> Result<PathBuf, ExportSinkError>;
}
