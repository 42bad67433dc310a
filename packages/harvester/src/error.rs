//! Error types for the harvester.
//!
//! The parsing core (`text`, `splitting`, `identifier`, `classification`)
//! is total and never fails. Everything that touches the network or the
//! filesystem reports through `HarvesterError`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Batch number outside the list of inputs.
    #[error("Invalid batch number: {batch}. Expected a value between 1 and {available}")]
    InvalidBatch { batch: usize, available: usize },

    /// No inputs were given.
    #[error("No input batches given")]
    NoInput,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// All retry attempts failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Failed to download a remote batch.
    #[error("Failed to download batch {url}: {source}")]
    BatchDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A batch line could not be decoded into a row.
    #[error("Invalid row at line {line} of {batch}: {source}")]
    InvalidRow {
        batch: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a JSON record failed.
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarvesterError::InvalidBatch {
            batch: 12,
            available: 11,
        };
        assert_eq!(
            err.to_string(),
            "Invalid batch number: 12. Expected a value between 1 and 11"
        );
    }

    #[test]
    fn test_invalid_row_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HarvesterError::InvalidRow {
            batch: "ruslawod_01.jsonl".to_string(),
            line: 7,
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid row at line 7 of ruslawod_01.jsonl"));
    }

    #[test]
    fn test_json_error_display_includes_path() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = HarvesterError::Json {
            path: PathBuf::from("data/seed/fz-1-2020.json"),
            source,
        };
        assert!(err.to_string().contains("data/seed/fz-1-2020.json"));
    }
}
