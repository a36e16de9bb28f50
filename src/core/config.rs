//! Run configuration.
//!
//! Every field has a default so the generator works without a config file.
//! A file can be TOML (default) or YAML (`.yaml` / `.yml`); CLI flags are
//! applied on top of whatever the file provides.
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:11434"
//! model = "mistral:latest"
//!
//! [output]
//! dir = "generated-framework"
//!
//! [pages.navigation]
//! page = "NavigationPage"
//! keywords = ["navigation", "menu"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::core::error::{ConfigError, Result};
use crate::core::utils::{is_java_identifier, is_java_package};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral:latest";

/// Shared base classes written into the pages and tests packages
pub const BASE_PAGE_CLASS: &str = "BasePage";
pub const BASE_TEST_CLASS: &str = "BaseTest";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub output: OutputConfig,
    pub portal: PortalConfig,
    pub pages: PagesConfig,
}

/// Local text-generation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// When false the probe is skipped and templates are used for everything
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub probe_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_SERVICE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            probe_timeout_secs: 5,
            request_timeout_secs: 120,
        }
    }
}

/// Output tree layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Source root inside `dir` that holds the package directories
    pub source_root: PathBuf,
    pub pages_package: String,
    pub tests_package: String,
    pub report_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("generated-framework"),
            source_root: PathBuf::from("src/test/java"),
            pages_package: "pages".to_string(),
            tests_package: "tests".to_string(),
            report_file: "generation-report.txt".to_string(),
        }
    }
}

/// Details about the portal under test that end up in generated code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// When set, login pages get an `open()` that navigates here
    pub login_url: Option<String>,
}

/// Page class and keywords for one scenario category.
///
/// Both fields are required once a category table is written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub page: String,
    pub keywords: Vec<String>,
}

impl CategoryConfig {
    fn new(page: &str, keywords: &[&str]) -> Self {
        Self {
            page: page.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Category to page mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PagesConfig {
    pub login: CategoryConfig,
    pub patient_search: CategoryConfig,
    pub messaging: CategoryConfig,
    /// Shares `MessagePage` with messaging by default
    pub navigation: CategoryConfig,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            login: CategoryConfig::new("LoginPage", &["login", "authentication"]),
            patient_search: CategoryConfig::new("PatientSearchPage", &["patient"]),
            messaging: CategoryConfig::new("MessagePage", &["message"]),
            navigation: CategoryConfig::new("MessagePage", &["navigation"]),
        }
    }
}

impl Config {
    /// Load configuration from a TOML or YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check values that deserialize fine but cannot produce a usable run
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.service.base_url).map_err(|e| {
            ConfigError::invalid(format!(
                "service.base_url '{}' is not a valid URL: {e}",
                self.service.base_url
            ))
        })?;

        if self.service.model.trim().is_empty() {
            return Err(ConfigError::invalid("service.model must not be empty"));
        }
        if self.service.probe_timeout_secs == 0 || self.service.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("service timeouts must be at least one second"));
        }

        for (key, package) in [
            ("output.pages_package", &self.output.pages_package),
            ("output.tests_package", &self.output.tests_package),
        ] {
            if !is_java_package(package) {
                return Err(ConfigError::invalid(format!(
                    "{key} '{package}' is not a valid Java package name"
                )));
            }
        }

        if self.output.pages_package == self.output.tests_package {
            return Err(ConfigError::invalid(format!(
                "output.pages_package and output.tests_package must differ (both '{}')",
                self.output.pages_package
            )));
        }

        if self.output.report_file.trim().is_empty() {
            return Err(ConfigError::invalid("output.report_file must not be empty"));
        }

        for (key, category) in [
            ("login", &self.pages.login),
            ("patient-search", &self.pages.patient_search),
            ("messaging", &self.pages.messaging),
            ("navigation", &self.pages.navigation),
        ] {
            if !is_java_identifier(&category.page) {
                return Err(ConfigError::invalid(format!(
                    "pages.{key}.page '{}' is not a valid Java class name",
                    category.page
                )));
            }
            if category.page == BASE_PAGE_CLASS {
                return Err(ConfigError::invalid(format!(
                    "pages.{key}.page must not be '{BASE_PAGE_CLASS}', which is the shared base class"
                )));
            }
            if category.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::invalid(format!(
                    "pages.{key}.keywords must not contain blank entries"
                )));
            }
        }

        Ok(())
    }
}
