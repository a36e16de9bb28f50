//! Natural-language generation requests for the text-generation service

use serde::Serialize;

use crate::generation::errors::GenerationError;
use crate::generation::plan::{ClassScenario, PagePlan};
use crate::generation::templates::{self, PAGE_PROMPT, TEST_CLASS_PROMPT};
use crate::generation::types::GenerationSettings;
use crate::scenario::ScenarioSpec;

#[derive(Serialize)]
struct PagePrompt<'a> {
    name: &'a str,
    package: &'a str,
    categories: Vec<String>,
    specs: &'a [ScenarioSpec],
}

#[derive(Serialize)]
struct ClassPrompt<'a> {
    name: &'a str,
    package: &'a str,
    pages_package: &'a str,
    pages: Vec<&'a str>,
    scenarios: Vec<ScenarioView<'a>>,
}

#[derive(Serialize)]
struct ScenarioView<'a> {
    spec: &'a ScenarioSpec,
    method_name: &'a str,
}

/// Renders prompts from the embedded prompt templates
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    settings: GenerationSettings,
}

impl PromptBuilder {
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    /// Prompt for a page plan, naming the categories it serves
    pub fn build_page_prompt(&self, page: &PagePlan) -> Result<String, GenerationError> {
        let view = PagePrompt {
            name: &page.name,
            package: &self.settings.pages_package,
            categories: page.categories.iter().map(|c| c.to_string()).collect(),
            specs: &page.specs,
        };
        let prompt = templates::render(PAGE_PROMPT, &view)?;
        tracing::debug!(page = %page.name, chars = prompt.len(), "Built page prompt");
        Ok(prompt)
    }

    /// Prompt for a test class with one method per scenario
    pub fn build_class_prompt(
        &self,
        class_name: &str,
        scenarios: &[ClassScenario],
        pages: Vec<&str>,
    ) -> Result<String, GenerationError> {
        let view = ClassPrompt {
            name: class_name,
            package: &self.settings.tests_package,
            pages_package: &self.settings.pages_package,
            pages,
            scenarios: scenarios
                .iter()
                .map(|scenario| ScenarioView {
                    spec: &scenario.spec,
                    method_name: &scenario.method_name,
                })
                .collect(),
        };
        let prompt = templates::render(TEST_CLASS_PROMPT, &view)?;
        tracing::debug!(class = class_name, chars = prompt.len(), "Built test class prompt");
        Ok(prompt)
    }
}
