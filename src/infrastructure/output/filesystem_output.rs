//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::{EmitError, EmitResult, OutputService};
use crate::generation::Artifact;

/// Writes artifacts to disk with skip-if-exists semantics.
///
/// The existence check and the write are separate steps. A file created by
/// a concurrent run in between is detected by `create_new` and reported as
/// skipped.
pub struct FileSystemEmitter;

impl FileSystemEmitter {
    pub fn new() -> Self {
        Self
    }

    async fn create_parent(path: &Path) -> Result<(), EmitError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| EmitError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl Default for FileSystemEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for FileSystemEmitter {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn emit(&self, artifact: &Artifact) -> Result<EmitResult, EmitError> {
        let path = artifact.path.as_path();
        if self.exists(path).await {
            tracing::info!(path = %path.display(), "File exists; skipping");
            return Ok(EmitResult::Skipped);
        }

        Self::create_parent(path).await?;

        let write_error = |source: std::io::Error| EmitError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::info!(path = %path.display(), "File appeared during the run; skipping");
                return Ok(EmitResult::Skipped);
            }
            Err(e) => return Err(write_error(e)),
        };

        file.write_all(artifact.content.as_bytes())
            .await
            .map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        tracing::debug!(path = %path.display(), bytes = artifact.content.len(), "Wrote file");
        Ok(EmitResult::Written)
    }

    async fn write_report(&self, path: &Path, content: &str) -> Result<(), EmitError> {
        Self::create_parent(path).await?;
        fs::write(path, content)
            .await
            .map_err(|source| EmitError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
