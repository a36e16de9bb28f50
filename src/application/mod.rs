//! Application layer - orchestrates use cases and coordinates between domains

pub mod errors;
pub mod generate_suite;
pub mod report;
pub mod traits;

pub use errors::*;
pub use generate_suite::{GenerateSuiteRequest, GenerateSuiteUseCase, select_backend};
pub use report::{ArtifactOutcome, EmitStatus, RunReport};
pub use traits::*;
