//! Infrastructure layer - concrete implementations of domain ports

pub mod ingestion;
pub mod output;
pub mod service;

pub use ingestion::CompositeScenarioLoader;
pub use output::FileSystemEmitter;
pub use service::ServiceClient;
