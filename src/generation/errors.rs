//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the scenario source. Always fatal to a run.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read scenario source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported scenario source '{path}': expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse workbook {path}: {reason}")]
    Workbook { path: PathBuf, reason: String },

    #[error("Workbook {path} has no worksheet")]
    NoWorksheet { path: PathBuf },

    #[error("Failed to parse CSV {path}: {reason}")]
    Csv { path: PathBuf, reason: String },
}

/// Errors talking to the text-generation service.
///
/// These never fail a run; the service backend turns them into a template
/// fallback. [`ServiceError::is_fatal`] separates requests that could not be
/// built from failures on the wire.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid service endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Malformed reply from {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("Reply from {url} has no usable '{field}' text")]
    EmptyReply { url: String, field: &'static str },
}

impl ServiceError {
    /// True when the request could not even be built: the endpoint cannot
    /// be joined or the HTTP client cannot be constructed. Everything that
    /// happens on the wire, including error statuses, is recoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidEndpoint { .. } | Self::Client(_))
    }
}

/// Errors raised while rendering embedded templates
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Render error: {0}")]
    RenderError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ServiceError {
        ServiceError::Status {
            url: "http://localhost:11434/api/generate".to_string(),
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_fatal_classification() {
        assert!(!status(404).is_fatal());
        assert!(!status(500).is_fatal());
        assert!(
            ServiceError::InvalidEndpoint {
                url: "x".to_string(),
                reason: "relative URL without a base".to_string()
            }
            .is_fatal()
        );
        assert!(ServiceError::Client("no TLS backend".to_string()).is_fatal());
        assert!(
            !ServiceError::Timeout {
                url: "x".to_string()
            }
            .is_fatal()
        );
        assert!(
            !ServiceError::EmptyReply {
                url: "x".to_string(),
                field: "response"
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_ingestion_error_messages() {
        let err = IngestionError::UnsupportedFormat {
            path: PathBuf::from("cases.txt"),
        };
        assert!(err.to_string().contains("cases.txt"));
        assert!(err.to_string().contains(".csv"));
    }
}
