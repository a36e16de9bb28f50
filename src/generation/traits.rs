//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::Path;

use crate::generation::{
    BackendKind, GenerationRequest, IngestionError, ServiceReply, Synthesis,
};
use crate::scenario::ScenarioSpec;

/// Reads a scenario source into specs, in row order
#[async_trait]
pub trait ScenarioLoader: Send + Sync {
    async fn load(&self, source: &Path) -> Result<Vec<ScenarioSpec>, IngestionError>;
}

/// Turns one generation request into source text.
///
/// Implementations never fail: any internal problem is resolved to some
/// usable text and recorded in [`Synthesis::origin`].
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn generate(&self, request: GenerationRequest<'_>) -> Synthesis;
}

/// A text-generation service reachable by prompt
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> ServiceReply;

    /// Clean a reply into a compilation unit declaring `package`
    fn sanitize(&self, text: &str, package: &str) -> String;
}
