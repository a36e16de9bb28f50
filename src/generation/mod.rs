//! Generation domain: from scenarios to Java source text
//!
//! Scenarios are grouped into a [`GenerationPlan`] of page classes and test
//! classes. Each planned class becomes a [`GenerationRequest`], which a
//! [`GenerationBackend`] turns into text. The template backend is pure; the
//! service backend asks a local model and falls back to templates per
//! artifact.

pub mod backends;
pub mod errors;
pub mod layout;
pub mod pages;
pub mod plan;
pub mod prompt;
pub mod sanitizers;
pub mod templates;
pub mod traits;
pub mod types;

pub use backends::{ServiceBackend, TemplateBackend};
pub use errors::*;
pub use layout::OutputLayout;
pub use pages::{PageCatalog, ScenarioCategory};
pub use plan::{
    BASE_PAGE_CLASS, BASE_TEST_CLASS, ClassPlan, ClassScenario, GenerationPlan, PagePlan,
    RESERVED_CLASS_SUFFIX, UNGROUPED_CLASS,
};
pub use prompt::PromptBuilder;
pub use traits::*;
pub use types::*;
