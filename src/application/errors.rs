//! Application layer error types

use std::path::PathBuf;
use thiserror::Error;

use crate::core::ConfigError;
use crate::generation::IngestionError;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write run report: {0}")]
    Report(#[source] EmitError),
}

/// Failure to write one file. Reported per artifact; the run continues.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_conversions() {
        let err: ApplicationError = IngestionError::UnsupportedFormat {
            path: PathBuf::from("cases.txt"),
        }
        .into();
        assert!(matches!(err, ApplicationError::Ingestion(_)));
        assert!(err.to_string().starts_with("Ingestion error:"));

        let err: ApplicationError = ConfigError::invalid("service.model must not be empty").into();
        assert!(err.to_string().contains("service.model"));

        let err = ApplicationError::Report(EmitError::CreateDir {
            path: PathBuf::from("out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert!(err.to_string().contains("out"));
    }

    #[test]
    fn test_emit_error_names_path() {
        let err = EmitError::Write {
            path: Path::new("out/LoginPage.java").to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write out/LoginPage.java: denied");
    }
}
