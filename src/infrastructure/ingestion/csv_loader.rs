//! CSV scenario loader

use async_trait::async_trait;
use csv::ReaderBuilder;
use std::path::Path;
use tokio::fs;

use crate::generation::{IngestionError, ScenarioLoader};
use crate::scenario::{ScenarioSpec, scenarios_from_rows};

/// Reads comma-separated scenarios; the first record is the header
pub struct CsvScenarioLoader {
    delimiter: u8,
}

impl CsvScenarioLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// All records, header included. Record lengths may differ.
    pub fn rows_from_str(&self, path: &Path, content: &str) -> Result<Vec<Vec<String>>, IngestionError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_string).collect())
                    .map_err(|e| IngestionError::Csv {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}

impl Default for CsvScenarioLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScenarioLoader for CsvScenarioLoader {
    async fn load(&self, source: &Path) -> Result<Vec<ScenarioSpec>, IngestionError> {
        let bytes = fs::read(source).await.map_err(|e| IngestionError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| IngestionError::Csv {
            path: source.to_path_buf(),
            reason: format!("not valid UTF-8: {e}"),
        })?;

        let rows = self.rows_from_str(source, &content)?;
        tracing::debug!(path = %source.display(), rows = rows.len(), "Read CSV");
        Ok(scenarios_from_rows(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "Test Case ID,Automation Class Name,Automation Method Name,Test Case (steps),Test Data";

    #[test]
    fn test_quoted_multiline_cells() {
        let content = format!(
            "{HEADER}\nTC_SMIT_01,PortalAuthenticationTest,loginPortal,\"1. Open portal\n2. Click Login\",\"Username: welldocsu\nPassword: welldoc123\"\n"
        );
        let rows = CsvScenarioLoader::new()
            .rows_from_str(Path::new("cases.csv"), &content)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][3], "1. Open portal\n2. Click Login");

        let specs = scenarios_from_rows(&rows);
        assert_eq!(specs[0].steps, vec!["Open portal", "Click Login"]);
        assert_eq!(specs[0].test_data_value("password"), Some("welldoc123"));
    }

    #[test]
    fn test_short_records_and_bom() {
        let content = format!("\u{feff}{HEADER}\nTC_1,LoginTest\n");
        let rows = CsvScenarioLoader::new()
            .rows_from_str(Path::new("cases.csv"), &content)
            .unwrap();
        let specs = scenarios_from_rows(&rows);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].id, "TC_1");
        assert!(specs[0].steps.is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let rows = CsvScenarioLoader::new()
            .with_delimiter(b';')
            .rows_from_str(Path::new("cases.csv"), "Test Case ID;Test Data\nTC_1;a: b\n")
            .unwrap();
        assert_eq!(rows[1], vec!["TC_1", "a: b"]);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.csv");
        std::fs::write(
            &path,
            format!("{HEADER}\nTC_1,LoginTest,login,Open,\n,LoginTest,skipped,Open,\nTC_2,PatientSearchTest,search,Open,\n"),
        )
        .unwrap();

        let specs = CsvScenarioLoader::new().load(&path).await.unwrap();
        let ids: Vec<_> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["TC_1", "TC_2"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.csv");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = CsvScenarioLoader::new().load(&path).await.unwrap_err();
        assert!(matches!(err, IngestionError::Csv { .. }));
    }
}
