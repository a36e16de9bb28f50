//! Shared foundations: configuration, its errors and identifier helpers.

pub mod config;
pub mod error;
pub mod utils;

pub use config::Config;
pub use error::ConfigError;
