//! Scenario domain: the in-memory form of one spreadsheet row and the
//! rules for reading rows into it.

pub mod parse;
pub mod spec;
pub mod table;

pub use parse::{parse_steps, parse_test_data};
pub use spec::{RawScenario, ScenarioSpec};
pub use table::{ColumnMap, RECOGNIZED_COLUMNS, scenarios_from_rows};
