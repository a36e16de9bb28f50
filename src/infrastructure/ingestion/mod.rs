//! Scenario source loaders

pub mod composite_loader;
pub mod csv_loader;
pub mod workbook_loader;

pub use composite_loader::CompositeScenarioLoader;
pub use csv_loader::CsvScenarioLoader;
pub use workbook_loader::WorkbookScenarioLoader;
