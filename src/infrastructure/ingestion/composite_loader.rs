//! Composite scenario loader that dispatches on the file extension

use async_trait::async_trait;
use std::path::Path;

use super::{CsvScenarioLoader, WorkbookScenarioLoader};
use crate::generation::{IngestionError, ScenarioLoader};
use crate::scenario::ScenarioSpec;

/// Extensions handed to the workbook loader
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Picks the workbook or CSV loader for a source path
pub struct CompositeScenarioLoader {
    workbook: Box<dyn ScenarioLoader>,
    csv: Box<dyn ScenarioLoader>,
}

impl CompositeScenarioLoader {
    pub fn new() -> Self {
        Self {
            workbook: Box::new(WorkbookScenarioLoader::new()),
            csv: Box::new(CsvScenarioLoader::new()),
        }
    }

    fn loader_for(&self, source: &Path) -> Option<&dyn ScenarioLoader> {
        let extension = source.extension()?.to_str()?.to_ascii_lowercase();
        if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Some(self.workbook.as_ref())
        } else if extension == "csv" {
            Some(self.csv.as_ref())
        } else {
            None
        }
    }
}

impl Default for CompositeScenarioLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScenarioLoader for CompositeScenarioLoader {
    async fn load(&self, source: &Path) -> Result<Vec<ScenarioSpec>, IngestionError> {
        let loader = self
            .loader_for(source)
            .ok_or_else(|| IngestionError::UnsupportedFormat {
                path: source.to_path_buf(),
            })?;

        tracing::debug!(path = %source.display(), "Loading scenarios");
        let specs = loader.load(source).await?;
        tracing::info!(path = %source.display(), scenarios = specs.len(), "Loaded scenarios");
        Ok(specs)
    }
}
