//! Header-driven mapping from raw table rows to scenarios

use std::collections::HashMap;

use crate::scenario::spec::{RawScenario, ScenarioSpec};

pub const TEST_CASE_ID: &str = "Test Case ID";
pub const AUTOMATION_CLASS_NAME: &str = "Automation Class Name";
pub const AUTOMATION_METHOD_NAME: &str = "Automation Method Name";
pub const PRE_CONDITIONS: &str = "Pre-Conditions";
pub const TEST_SCENARIO_SUMMARY: &str = "Test Scenario Summary";
pub const TEST_DATA: &str = "Test Data";
pub const TEST_CASE_STEPS: &str = "Test Case (steps)";
pub const EXPECTED_RESULTS: &str = "Expected Results";

/// Every header the ingestion step understands
pub const RECOGNIZED_COLUMNS: [&str; 8] = [
    TEST_CASE_ID,
    AUTOMATION_CLASS_NAME,
    AUTOMATION_METHOD_NAME,
    PRE_CONDITIONS,
    TEST_SCENARIO_SUMMARY,
    TEST_DATA,
    TEST_CASE_STEPS,
    EXPECTED_RESULTS,
];

/// Header name to column index, built from the first row
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<String, usize>,
}

impl ColumnMap {
    /// Build from header cells; names are trimmed, matching is case-sensitive
    pub fn from_header(header: &[String]) -> Self {
        let mut columns = HashMap::new();
        for (index, name) in header.iter().enumerate() {
            let name = name.trim();
            if !name.is_empty() {
                columns.entry(name.to_string()).or_insert(index);
            }
        }
        Self { columns }
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    /// Cell text for `column`, or `""` when the column or cell is absent
    pub fn cell<'a>(&self, row: &'a [String], column: &str) -> &'a str {
        self.index_of(column)
            .and_then(|index| row.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Recognized columns that the header did not provide
    pub fn missing_columns(&self) -> Vec<&'static str> {
        RECOGNIZED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !self.columns.contains_key(*column))
            .collect()
    }
}

/// Convert a header row plus data rows into scenarios.
///
/// Input order is preserved. Rows whose identifier cell is blank are dropped.
/// Missing columns only produce empty fields.
pub fn scenarios_from_rows(rows: &[Vec<String>]) -> Vec<ScenarioSpec> {
    let Some((header, data)) = rows.split_first() else {
        tracing::warn!("Scenario table is empty; no header row found");
        return Vec::new();
    };

    let columns = ColumnMap::from_header(header);
    let missing = columns.missing_columns();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Scenario table is missing columns; using empty values");
    }

    let mut specs = Vec::new();
    for (offset, row) in data.iter().enumerate() {
        let id = columns.cell(row, TEST_CASE_ID);
        if id.trim().is_empty() {
            tracing::debug!(row = offset + 2, "Skipping row without a test case id");
            continue;
        }

        specs.push(ScenarioSpec::from_cells(RawScenario {
            id,
            target_class_name: columns.cell(row, AUTOMATION_CLASS_NAME),
            target_method_name: columns.cell(row, AUTOMATION_METHOD_NAME),
            preconditions: columns.cell(row, PRE_CONDITIONS),
            summary: columns.cell(row, TEST_SCENARIO_SUMMARY),
            test_data: columns.cell(row, TEST_DATA),
            steps: columns.cell(row, TEST_CASE_STEPS),
            expected_result: columns.cell(row, EXPECTED_RESULTS),
        }));
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_rows_map_by_header_in_any_order() {
        let rows = vec![
            row(&[
                "Expected Results",
                "Test Case ID",
                "Automation Class Name",
                "Test Case (steps)",
                "Test Data",
            ]),
            row(&[
                "User is logged in",
                "TC_SMIT_01",
                "PortalAuthenticationTest",
                "1. Open portal\n2. Click Login",
                "Username: welldocsu",
            ]),
        ];

        let specs = scenarios_from_rows(&rows);
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.id, "TC_SMIT_01");
        assert_eq!(spec.target_class_name, "PortalAuthenticationTest");
        assert_eq!(spec.expected_result, "User is logged in");
        assert_eq!(spec.steps, vec!["Open portal", "Click Login"]);
        assert_eq!(spec.test_data_value("USERNAME"), Some("welldocsu"));
        // Columns absent from the header become empty strings
        assert_eq!(spec.target_method_name, "");
        assert_eq!(spec.summary, "");
    }

    #[test]
    fn test_blank_ids_are_dropped() {
        let rows = vec![
            row(&["Test Case ID", "Test Scenario Summary"]),
            row(&["TC_1", "first"]),
            row(&["   ", "blank id"]),
            row(&[]),
            row(&["TC_2", "second"]),
        ];

        let specs = scenarios_from_rows(&rows);
        let ids: Vec<_> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["TC_1", "TC_2"]);
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let rows = vec![row(&["test case id"]), row(&["TC_1"])];
        assert!(scenarios_from_rows(&rows).is_empty());
    }

    #[test]
    fn test_empty_table() {
        assert!(scenarios_from_rows(&[]).is_empty());
        assert!(scenarios_from_rows(&[row(&["Test Case ID"])]).is_empty());
    }

    #[test]
    fn test_missing_columns() {
        let columns = ColumnMap::from_header(&row(&["Test Case ID", " Test Data "]));
        let missing = columns.missing_columns();
        assert_eq!(missing.len(), 6);
        assert!(!missing.contains(&TEST_DATA));
        assert!(missing.contains(&EXPECTED_RESULTS));
    }
}
