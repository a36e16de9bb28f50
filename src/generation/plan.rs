//! Grouping of scenarios into the files a run will produce

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::core::utils::{java_class_name, java_method_name};
use crate::generation::pages::{PageCatalog, ScenarioCategory};
use crate::scenario::ScenarioSpec;

/// Class that collects scenarios with a blank target class name
pub const UNGROUPED_CLASS: &str = "UngroupedTest";

pub use crate::core::config::{BASE_PAGE_CLASS, BASE_TEST_CLASS};

/// Appended to a target class name that would overwrite a base class
pub const RESERVED_CLASS_SUFFIX: &str = "Scenarios";

/// One page class and the scenarios that need it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub name: String,
    /// Categories observed in `specs` that map to this page
    pub categories: BTreeSet<ScenarioCategory>,
    pub specs: Vec<ScenarioSpec>,
}

impl PagePlan {
    pub fn has(&self, category: ScenarioCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// A scenario placed in a test class, with its final method name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassScenario {
    pub spec: ScenarioSpec,
    pub method_name: String,
}

/// One test class and its scenarios in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPlan {
    pub name: String,
    /// Categories hit by the scenarios' target class names, with their page
    pub categories: BTreeMap<ScenarioCategory, String>,
    pub scenarios: Vec<ClassScenario>,
}

impl ClassPlan {
    fn new(name: String) -> Self {
        Self {
            name,
            categories: BTreeMap::new(),
            scenarios: Vec::new(),
        }
    }

    pub fn has(&self, category: ScenarioCategory) -> bool {
        self.categories.contains_key(&category)
    }

    pub fn page_for(&self, category: ScenarioCategory) -> Option<&str> {
        self.categories.get(&category).map(String::as_str)
    }

    /// Page classes the test instantiates
    pub fn pages(&self) -> BTreeSet<&str> {
        self.categories.values().map(String::as_str).collect()
    }

    pub fn specs(&self) -> impl Iterator<Item = &ScenarioSpec> {
        self.scenarios.iter().map(|scenario| &scenario.spec)
    }

    fn push(&mut self, spec: &ScenarioSpec, catalog: &PageCatalog, used: &mut HashSet<String>) {
        for category in catalog.categories_for(&spec.target_class_name) {
            if let Some(page) = catalog.page_for(category) {
                self.categories.insert(category, page.to_string());
            }
        }

        let base = java_method_name(&spec.target_method_name, &spec.id);
        let mut method_name = base.clone();
        let mut suffix = 2;
        while !used.insert(method_name.clone()) {
            method_name = format!("{base}{suffix}");
            suffix += 1;
        }

        self.scenarios.push(ClassScenario {
            spec: spec.clone(),
            method_name,
        });
    }
}

/// Everything one run will synthesize, in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Sorted by page name
    pub pages: Vec<PagePlan>,
    /// Sorted by normalized class name
    pub classes: Vec<ClassPlan>,
    pub scenario_count: usize,
}

impl GenerationPlan {
    pub fn build(specs: &[ScenarioSpec], catalog: &PageCatalog) -> Self {
        let pages = catalog
            .infer(specs)
            .into_iter()
            .map(|name| {
                let page_specs = catalog.specs_for_page(&name, specs);
                let categories = page_specs
                    .iter()
                    .flat_map(|spec| catalog.categories_for(&spec.target_class_name))
                    .filter(|category| catalog.page_for(*category) == Some(name.as_str()))
                    .collect();
                PagePlan {
                    categories,
                    specs: page_specs.into_iter().cloned().collect(),
                    name,
                }
            })
            .collect();

        let mut classes: BTreeMap<String, (ClassPlan, HashSet<String>)> = BTreeMap::new();
        for spec in specs {
            let normalized = java_class_name(&spec.target_class_name, UNGROUPED_CLASS);
            let name = if [BASE_PAGE_CLASS, BASE_TEST_CLASS].contains(&normalized.as_str()) {
                format!("{normalized}{RESERVED_CLASS_SUFFIX}")
            } else {
                normalized.clone()
            };
            let (class, used) = classes.entry(name.clone()).or_insert_with(|| {
                if name != normalized {
                    tracing::warn!(
                        class = %normalized,
                        renamed = %name,
                        "Target class name is reserved for a base class; renaming"
                    );
                }
                (ClassPlan::new(name), HashSet::new())
            });
            class.push(spec, catalog, used);
        }

        Self {
            pages,
            classes: classes.into_values().map(|(class, _)| class).collect(),
            scenario_count: specs.len(),
        }
    }

    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.name.as_str())
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| class.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, class: &str, method: &str) -> ScenarioSpec {
        ScenarioSpec {
            id: id.to_string(),
            target_class_name: class.to_string(),
            target_method_name: method.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_for_smit_scenarios() {
        let specs = vec![
            spec("TC_SMIT_01", "PortalAuthenticationTest", "loginPortal"),
            spec("TC_SMIT_02", "PatientSearchTest", "searchPatient"),
            spec("TC_SMIT_03", "PortalNavigationTest", "navigateToMessages"),
        ];
        let plan = GenerationPlan::build(&specs, &PageCatalog::default());

        assert_eq!(plan.scenario_count, 3);
        assert_eq!(
            plan.page_names().collect::<Vec<_>>(),
            vec!["LoginPage", "MessagePage", "PatientSearchPage"]
        );
        assert_eq!(
            plan.class_names().collect::<Vec<_>>(),
            vec!["PatientSearchTest", "PortalAuthenticationTest", "PortalNavigationTest"]
        );

        let message_page = &plan.pages[1];
        assert!(message_page.has(ScenarioCategory::Navigation));
        assert!(!message_page.has(ScenarioCategory::Messaging));
        assert_eq!(message_page.specs.len(), 1);

        let auth = &plan.classes[1];
        assert!(auth.has(ScenarioCategory::Login));
        assert_eq!(auth.pages().into_iter().collect::<Vec<_>>(), vec!["LoginPage"]);
        assert_eq!(plan.classes[2].page_for(ScenarioCategory::Navigation), Some("MessagePage"));
    }

    #[test]
    fn test_classes_group_by_normalized_name() {
        let specs = vec![
            spec("TC_1", "portal login test", "first"),
            spec("TC_2", "PortalLoginTest", "second"),
            spec("TC_3", "  ", ""),
        ];
        let plan = GenerationPlan::build(&specs, &PageCatalog::default());

        assert_eq!(
            plan.class_names().collect::<Vec<_>>(),
            vec!["PortalLoginTest", UNGROUPED_CLASS]
        );
        let grouped = &plan.classes[0];
        let ids: Vec<_> = grouped.specs().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["TC_1", "TC_2"]);
        assert_eq!(plan.classes[1].scenarios[0].method_name, "testTc3");
    }

    #[test]
    fn test_duplicate_method_names_get_suffixes() {
        let specs = vec![
            spec("TC_1", "LoginTest", "login"),
            spec("TC_2", "LoginTest", "login"),
            spec("TC_3", "LoginTest", "login"),
        ];
        let plan = GenerationPlan::build(&specs, &PageCatalog::default());
        let methods: Vec<_> = plan.classes[0]
            .scenarios
            .iter()
            .map(|s| s.method_name.as_str())
            .collect();
        assert_eq!(methods, vec!["login", "login2", "login3"]);
    }

    #[test]
    fn test_base_class_names_are_renamed() {
        let specs = vec![
            spec("TC_1", "BaseTest", "checkSmoke"),
            spec("TC_2", "base test", "checkAgain"),
            spec("TC_3", "BasePage", "checkPage"),
        ];
        let plan = GenerationPlan::build(&specs, &PageCatalog::default());

        assert_eq!(
            plan.class_names().collect::<Vec<_>>(),
            vec!["BasePageScenarios", "BaseTestScenarios"]
        );
        let methods: Vec<_> = plan.classes[1]
            .scenarios
            .iter()
            .map(|s| s.method_name.as_str())
            .collect();
        assert_eq!(methods, vec!["checkSmoke", "checkAgain"]);
    }

    #[test]
    fn test_empty_input_plans_nothing() {
        let plan = GenerationPlan::build(&[], &PageCatalog::default());
        assert!(plan.pages.is_empty());
        assert!(plan.classes.is_empty());
        assert_eq!(plan.scenario_count, 0);
    }
}
