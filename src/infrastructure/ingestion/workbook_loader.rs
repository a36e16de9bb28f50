//! Spreadsheet scenario loader backed by calamine

use async_trait::async_trait;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::path::Path;
use tokio::fs;

use crate::generation::{IngestionError, ScenarioLoader};
use crate::scenario::{ScenarioSpec, scenarios_from_rows};

/// Reads the first worksheet of an Excel or OpenDocument workbook
pub struct WorkbookScenarioLoader;

impl WorkbookScenarioLoader {
    pub fn new() -> Self {
        Self
    }

    /// Rows of the first worksheet as cell text
    pub fn rows_from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Vec<Vec<String>>, IngestionError> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestionError::Workbook {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IngestionError::NoWorksheet {
                path: path.to_path_buf(),
            })?
            .map_err(|e| IngestionError::Workbook {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }
}

impl Default for WorkbookScenarioLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Display text of one cell.
///
/// Whole floats drop the fractional part so ids typed as numbers read back
/// the way they look in the sheet.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl ScenarioLoader for WorkbookScenarioLoader {
    async fn load(&self, source: &Path) -> Result<Vec<ScenarioSpec>, IngestionError> {
        let bytes = fs::read(source).await.map_err(|e| IngestionError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        let rows = Self::rows_from_bytes(source, bytes)?;
        tracing::debug!(path = %source.display(), rows = rows.len(), "Read worksheet");
        Ok(scenarios_from_rows(&rows))
    }
}
