//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::application::EmitError;
use crate::generation::Artifact;

/// What happened to one artifact at the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitResult {
    Written,
    /// A file already existed at the path and was left untouched
    Skipped,
}

/// Destination for generated files
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Whether something already occupies `path`
    async fn exists(&self, path: &Path) -> bool;

    /// Write the artifact unless its path is already taken. Never overwrites.
    async fn emit(&self, artifact: &Artifact) -> Result<EmitResult, EmitError>;

    /// Write the run report, replacing any previous one
    async fn write_report(&self, path: &Path, content: &str) -> Result<(), EmitError>;
}
