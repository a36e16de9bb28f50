//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::generation::errors::ServiceError;
use crate::generation::plan::{BASE_PAGE_CLASS, BASE_TEST_CLASS, ClassPlan, PagePlan};

/// What an artifact is, which decides where it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    PageClass,
    TestClass,
    BasePage,
    BaseTest,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::PageClass => "page",
            ArtifactKind::TestClass => "test",
            ArtifactKind::BasePage => "base page",
            ArtifactKind::BaseTest => "base test",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a service synthesis was replaced by template output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    Recoverable(String),
    Fatal(String),
}

impl FallbackReason {
    pub fn message(&self) -> &str {
        match self {
            FallbackReason::Recoverable(msg) | FallbackReason::Fatal(msg) => msg,
        }
    }
}

/// Where the text of an artifact came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisOrigin {
    Template,
    Service,
    Fallback(FallbackReason),
}

impl SynthesisOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, SynthesisOrigin::Fallback(_))
    }
}

impl fmt::Display for SynthesisOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisOrigin::Template => write!(f, "template"),
            SynthesisOrigin::Service => write!(f, "service"),
            SynthesisOrigin::Fallback(_) => write!(f, "template fallback"),
        }
    }
}

/// Text produced by a backend for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub text: String,
    pub origin: SynthesisOrigin,
}

impl Synthesis {
    pub fn template(text: String) -> Self {
        Self {
            text,
            origin: SynthesisOrigin::Template,
        }
    }

    pub fn service(text: String) -> Self {
        Self {
            text,
            origin: SynthesisOrigin::Service,
        }
    }
}

/// Outcome of one call to the text-generation service
#[derive(Debug)]
pub enum ServiceReply {
    Text(String),
    /// The request reached the service, or could have; another may succeed
    Recoverable(ServiceError),
    /// The request could not be built or was refused outright
    Fatal(ServiceError),
}

impl ServiceReply {
    /// Classify an error by [`ServiceError::is_fatal`]
    pub fn from_error(error: ServiceError) -> Self {
        if error.is_fatal() {
            ServiceReply::Fatal(error)
        } else {
            ServiceReply::Recoverable(error)
        }
    }
}

/// One class the generator asks a backend to write.
///
/// Borrowed from the run's plan and dropped once the synthesis is back.
#[derive(Debug, Clone, Copy)]
pub enum GenerationRequest<'a> {
    Page(&'a PagePlan),
    TestClass(&'a ClassPlan),
    BasePage,
    BaseTest,
}

impl GenerationRequest<'_> {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            GenerationRequest::Page(_) => ArtifactKind::PageClass,
            GenerationRequest::TestClass(_) => ArtifactKind::TestClass,
            GenerationRequest::BasePage => ArtifactKind::BasePage,
            GenerationRequest::BaseTest => ArtifactKind::BaseTest,
        }
    }

    /// Java class name of the requested file
    pub fn class_name(&self) -> &str {
        match self {
            GenerationRequest::Page(page) => &page.name,
            GenerationRequest::TestClass(class) => &class.name,
            GenerationRequest::BasePage => BASE_PAGE_CLASS,
            GenerationRequest::BaseTest => BASE_TEST_CLASS,
        }
    }
}

/// Which backend produced a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    Template,
    Service { model: String },
}

impl BackendKind {
    /// Label used by the run report
    pub fn generation_method(&self) -> String {
        match self {
            BackendKind::Template => "Template-based".to_string(),
            BackendKind::Service { model } => format!("Service ({model})"),
        }
    }
}

/// A synthesized file, ready for the emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Java class name
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub origin: SynthesisOrigin,
}

/// Values every backend needs when writing Java source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub pages_package: String,
    pub tests_package: String,
    pub login_url: Option<String>,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pages_package: config.output.pages_package.clone(),
            tests_package: config.output.tests_package.clone(),
            login_url: config
                .portal
                .login_url
                .as_ref()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        }
    }

    /// Package declared by the file a request produces
    pub fn package_for(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::PageClass | ArtifactKind::BasePage => &self.pages_package,
            ArtifactKind::TestClass | ArtifactKind::BaseTest => &self.tests_package,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
