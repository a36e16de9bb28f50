//! Page inference: which page classes a set of scenarios needs.
//!
//! Scenarios are sorted into a closed set of [`ScenarioCategory`] values by
//! keyword matches against their target class name. Each category maps to one
//! page class name; the table comes from [`PagesConfig`] so the mapping is
//! fixed before any scenario is read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::config::{CategoryConfig, PagesConfig};
use crate::scenario::ScenarioSpec;

/// Kinds of scenario the generator knows how to build page members for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioCategory {
    Login,
    PatientSearch,
    Messaging,
    Navigation,
}

impl ScenarioCategory {
    pub fn all() -> [ScenarioCategory; 4] {
        [
            ScenarioCategory::Login,
            ScenarioCategory::PatientSearch,
            ScenarioCategory::Messaging,
            ScenarioCategory::Navigation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioCategory::Login => "login",
            ScenarioCategory::PatientSearch => "patient-search",
            ScenarioCategory::Messaging => "messaging",
            ScenarioCategory::Navigation => "navigation",
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "login" => Ok(ScenarioCategory::Login),
            "patient-search" | "patient_search" => Ok(ScenarioCategory::PatientSearch),
            "messaging" => Ok(ScenarioCategory::Messaging),
            "navigation" => Ok(ScenarioCategory::Navigation),
            other => Err(format!("unknown scenario category '{other}'")),
        }
    }
}

/// One row of the category table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: ScenarioCategory,
    pub page: String,
    /// Lower-cased
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn new(category: ScenarioCategory, config: &CategoryConfig) -> Self {
        Self {
            category,
            page: config.page.clone(),
            keywords: config
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, class_name_lower: &str) -> bool {
        self.keywords.iter().any(|k| class_name_lower.contains(k.as_str()))
    }
}

/// The category to page table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCatalog {
    rules: Vec<CategoryRule>,
}

impl PageCatalog {
    pub fn from_config(config: &PagesConfig) -> Self {
        Self {
            rules: vec![
                CategoryRule::new(ScenarioCategory::Login, &config.login),
                CategoryRule::new(ScenarioCategory::PatientSearch, &config.patient_search),
                CategoryRule::new(ScenarioCategory::Messaging, &config.messaging),
                CategoryRule::new(ScenarioCategory::Navigation, &config.navigation),
            ],
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Page class name for a category
    pub fn page_for(&self, category: ScenarioCategory) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.category == category)
            .map(|rule| rule.page.as_str())
    }

    /// Categories whose keywords occur in `class_name`, case-insensitively
    pub fn categories_for(&self, class_name: &str) -> BTreeSet<ScenarioCategory> {
        let lower = class_name.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matches(&lower))
            .map(|rule| rule.category)
            .collect()
    }

    /// Page names required by one target class name
    pub fn pages_for(&self, class_name: &str) -> BTreeSet<String> {
        let lower = class_name.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.matches(&lower))
            .map(|rule| rule.page.clone())
            .collect()
    }

    /// Distinct page names required by `specs`.
    ///
    /// Depends only on the multiset of target class names, never on order.
    pub fn infer(&self, specs: &[ScenarioSpec]) -> BTreeSet<String> {
        specs
            .iter()
            .flat_map(|spec| self.pages_for(&spec.target_class_name))
            .collect()
    }

    /// Every category the table maps onto `page`
    pub fn categories_for_page(&self, page: &str) -> BTreeSet<ScenarioCategory> {
        self.rules
            .iter()
            .filter(|rule| rule.page == page)
            .map(|rule| rule.category)
            .collect()
    }

    /// Specs whose target class maps to `page`, in input order
    pub fn specs_for_page<'a>(&self, page: &str, specs: &'a [ScenarioSpec]) -> Vec<&'a ScenarioSpec> {
        specs
            .iter()
            .filter(|spec| self.pages_for(&spec.target_class_name).contains(page))
            .collect()
    }
}

impl Default for PageCatalog {
    fn default() -> Self {
        Self::from_config(&PagesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, class: &str) -> ScenarioSpec {
        ScenarioSpec {
            id: id.to_string(),
            target_class_name: class.to_string(),
            ..Default::default()
        }
    }

    fn smit_specs() -> Vec<ScenarioSpec> {
        vec![
            spec("TC_SMIT_01", "PortalAuthenticationTest"),
            spec("TC_SMIT_02", "PatientSearchTest"),
            spec("TC_SMIT_03", "PortalNavigationTest"),
        ]
    }

    #[test]
    fn test_infer_smit_scenarios() {
        let catalog = PageCatalog::default();
        let pages = catalog.infer(&smit_specs());
        let pages: Vec<_> = pages.iter().map(String::as_str).collect();
        assert_eq!(pages, vec!["LoginPage", "MessagePage", "PatientSearchPage"]);
    }

    #[test]
    fn test_infer_is_order_independent() {
        let catalog = PageCatalog::default();
        let mut reversed = smit_specs();
        reversed.reverse();
        reversed.push(spec("TC_SMIT_04", "PortalAuthenticationTest"));
        assert_eq!(catalog.infer(&smit_specs()), catalog.infer(&reversed));
    }

    #[test]
    fn test_unrecognized_class_contributes_nothing() {
        let catalog = PageCatalog::default();
        assert!(catalog.infer(&[spec("TC_9", "ReportingTest")]).is_empty());
        assert!(catalog.categories_for("").is_empty());
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let catalog = PageCatalog::default();
        let categories = catalog.categories_for("LOGINandMESSAGEtest");
        assert!(categories.contains(&ScenarioCategory::Login));
        assert!(categories.contains(&ScenarioCategory::Messaging));
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn test_navigation_shares_message_page() {
        let catalog = PageCatalog::default();
        let categories = catalog.categories_for_page("MessagePage");
        assert_eq!(
            categories.into_iter().collect::<Vec<_>>(),
            vec![ScenarioCategory::Messaging, ScenarioCategory::Navigation]
        );
        assert_eq!(catalog.page_for(ScenarioCategory::Navigation), Some("MessagePage"));
    }

    #[test]
    fn test_configured_table_overrides_defaults() {
        let mut config = PagesConfig::default();
        config.navigation = CategoryConfig {
            page: "NavigationPage".to_string(),
            keywords: vec!["Menu".to_string()],
        };
        let catalog = PageCatalog::from_config(&config);

        assert!(catalog.pages_for("PortalNavigationTest").is_empty());
        assert_eq!(
            catalog.pages_for("MainMenuTest").into_iter().collect::<Vec<_>>(),
            vec!["NavigationPage".to_string()]
        );
    }

    #[test]
    fn test_specs_for_page_keeps_input_order() {
        let catalog = PageCatalog::default();
        let specs = vec![
            spec("TC_3", "PortalNavigationTest"),
            spec("TC_1", "PatientSearchTest"),
            spec("TC_2", "SendMessageTest"),
        ];
        let ids: Vec<_> = catalog
            .specs_for_page("MessagePage", &specs)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["TC_3", "TC_2"]);
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in ScenarioCategory::all() {
            assert_eq!(category.as_str().parse::<ScenarioCategory>().unwrap(), category);
        }
        assert!("reporting".parse::<ScenarioCategory>().is_err());
    }
}
