//! Local Filesystem Export Sink - writes exported documents to a directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{ExportSink, ExportSinkError, ExportedDocument};

/// Writes exported documents into `output_dir`.
///
/// # Atomic Writes
///
/// 1. Write content to `{filename}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{filename}`
///
/// An existing file with the same name is replaced. If any step fails the
/// temp file is removed.
#[derive(Debug, Clone)]
pub struct LocalExportSink {
    output_dir: PathBuf,
}

impl LocalExportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Accepts a bare file name only; anything that would escape the
    /// output directory is refused.
    fn target_name(filename: &str) -> Result<&str, ExportSinkError> {
        let trimmed = filename.trim();
        let bare = Path::new(trimmed).file_name().and_then(|n| n.to_str());
        match bare {
            Some(name) if name == trimmed && !name.starts_with('.') => Ok(name),
            _ => Err(ExportSinkError::InvalidFilename(filename.to_string())),
        }
    }

    async fn write_atomic(
        temp_path: &Path,
        final_path: &Path,
        content: &[u8],
    ) -> Result<(), ExportSinkError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            ExportSinkError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(content).await.map_err(|e| {
            ExportSinkError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            ExportSinkError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            ExportSinkError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ExportSink for LocalExportSink {
    async fn store(&self, document: &ExportedDocument) -> Result<PathBuf, ExportSinkError> {
        let name = Self::target_name(&document.filename)?;

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            ExportSinkError::io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let final_path = self.output_dir.join(name);
        let temp_path = self.output_dir.join(format!("{}.tmp", name));

        if let Err(error) = Self::write_atomic(&temp_path, &final_path, &document.content).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                tracing::debug!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "Temp file not removed"
                );
            }
            return Err(error);
        }

        tracing::debug!(path = %final_path.display(), bytes = document.len(), "Stored export");
        Ok(final_path)
    }
}
