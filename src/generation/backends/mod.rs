//! The two interchangeable synthesis strategies

pub mod service;
pub mod template;

pub use service::ServiceBackend;
pub use template::TemplateBackend;
