//! The scenario model: one spreadsheet row, parsed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scenario::parse::{parse_steps, parse_test_data};

/// One test scenario as read from the input sheet.
///
/// `steps` are in execution order. `structured_test_data` keys are
/// lower-cased; use [`ScenarioSpec::test_data_value`] for lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub id: String,
    pub target_class_name: String,
    pub target_method_name: String,
    pub preconditions: String,
    pub summary: String,
    pub raw_test_data: String,
    pub structured_test_data: BTreeMap<String, String>,
    pub steps: Vec<String>,
    pub expected_result: String,
}

impl ScenarioSpec {
    /// Build a spec from raw cell text, deriving steps and structured data.
    ///
    /// Fields are trimmed; `raw_steps` and `raw_test_data` are parsed.
    pub fn from_cells(cells: RawScenario<'_>) -> Self {
        Self {
            id: cells.id.trim().to_string(),
            target_class_name: cells.target_class_name.trim().to_string(),
            target_method_name: cells.target_method_name.trim().to_string(),
            preconditions: cells.preconditions.trim().to_string(),
            summary: cells.summary.trim().to_string(),
            raw_test_data: cells.test_data.trim().to_string(),
            structured_test_data: parse_test_data(cells.test_data),
            steps: parse_steps(cells.steps),
            expected_result: cells.expected_result.trim().to_string(),
        }
    }

    /// Case-insensitive lookup into the structured test data
    pub fn test_data_value(&self, key: &str) -> Option<&str> {
        self.structured_test_data
            .get(&key.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Whether any step looks like a navigation instruction
    pub fn has_navigation_steps(&self) -> bool {
        self.steps.iter().any(|step| {
            let step = step.to_lowercase();
            step.contains("http") || step.contains("navigate") || step.contains("url")
        })
    }

    /// First URL mentioned in the steps, with trailing `.,;` stripped
    pub fn extract_url(&self) -> Option<String> {
        self.steps
            .iter()
            .flat_map(|step| step.split_whitespace())
            .find(|word| word.to_lowercase().starts_with("http"))
            .map(|word| word.trim_end_matches(['.', ',', ';']).to_string())
    }
}

/// Borrowed cell text for one row, before parsing
#[derive(Debug, Clone, Copy, Default)]
pub struct RawScenario<'a> {
    pub id: &'a str,
    pub target_class_name: &'a str,
    pub target_method_name: &'a str,
    pub preconditions: &'a str,
    pub summary: &'a str,
    pub test_data: &'a str,
    pub steps: &'a str,
    pub expected_result: &'a str,
}
