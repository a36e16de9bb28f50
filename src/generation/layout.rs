//! Paths of the generated Maven test tree

use std::path::{Path, PathBuf};

use crate::core::config::OutputConfig;
use crate::generation::plan::{BASE_PAGE_CLASS, BASE_TEST_CLASS};
use crate::generation::types::ArtifactKind;

/// Maps class names onto file paths under the output directory.
///
/// ```
/// use pomforge::core::config::OutputConfig;
/// use pomforge::generation::layout::OutputLayout;
/// use std::path::Path;
///
/// let layout = OutputLayout::new(Path::new("out"), &OutputConfig::default());
/// assert_eq!(
///     layout.page_path("LoginPage"),
///     Path::new("out/src/test/java/pages/LoginPage.java")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    pages_dir: PathBuf,
    tests_dir: PathBuf,
    report_file: String,
}

impl OutputLayout {
    /// `root` replaces `config.dir`, so CLI overrides can be applied first
    pub fn new(root: &Path, config: &OutputConfig) -> Self {
        let source_root = root.join(&config.source_root);
        Self {
            root: root.to_path_buf(),
            pages_dir: source_root.join(package_dir(&config.pages_package)),
            tests_dir: source_root.join(package_dir(&config.tests_package)),
            report_file: config.report_file.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn page_path(&self, page: &str) -> PathBuf {
        self.pages_dir.join(format!("{page}.java"))
    }

    pub fn test_path(&self, class: &str) -> PathBuf {
        self.tests_dir.join(format!("{class}.java"))
    }

    pub fn base_page_path(&self) -> PathBuf {
        self.page_path(BASE_PAGE_CLASS)
    }

    pub fn base_test_path(&self) -> PathBuf {
        self.test_path(BASE_TEST_CLASS)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.report_file)
    }

    pub fn path_for(&self, kind: ArtifactKind, name: &str) -> PathBuf {
        match kind {
            ArtifactKind::PageClass => self.page_path(name),
            ArtifactKind::TestClass => self.test_path(name),
            ArtifactKind::BasePage => self.base_page_path(),
            ArtifactKind::BaseTest => self.base_test_path(),
        }
    }

    /// `path` relative to the output root, for display
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

fn package_dir(package: &str) -> PathBuf {
    package.split('.').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = OutputLayout::new(Path::new("generated-framework"), &OutputConfig::default());
        assert_eq!(
            layout.base_test_path(),
            Path::new("generated-framework/src/test/java/tests/BaseTest.java")
        );
        assert_eq!(
            layout.base_page_path(),
            Path::new("generated-framework/src/test/java/pages/BasePage.java")
        );
        assert_eq!(
            layout.report_path(),
            Path::new("generated-framework/generation-report.txt")
        );
    }

    #[test]
    fn test_dotted_packages_become_directories() {
        let config = OutputConfig {
            pages_package: "com.acme.pages".to_string(),
            tests_package: "com.acme.tests".to_string(),
            ..Default::default()
        };
        let layout = OutputLayout::new(Path::new("out"), &config);
        assert_eq!(
            layout.path_for(ArtifactKind::TestClass, "LoginTest"),
            Path::new("out/src/test/java/com/acme/tests/LoginTest.java")
        );
        assert_eq!(
            layout.relative(&layout.page_path("LoginPage")),
            Path::new("src/test/java/com/acme/pages/LoginPage.java")
        );
    }
}
