//! Error types for loading records and configuration.

use std::path::PathBuf;
use thiserror::Error;

use donor_model::ModelError;

/// Errors that can occur when loading records or table configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Input file not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension is not one of the supported formats.
    #[error("Unsupported file type for {path} (expected {expected})")]
    UnsupportedFormat {
        path: PathBuf,
        expected: &'static str,
    },

    /// Failed to read the file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or parse CSV input.
    #[error("Failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse JSON input.
    #[error("Failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A JSON record file must be an array of objects.
    #[error("Expected an array of objects in {path}, found {found} at row {row}")]
    NotAnObject {
        path: PathBuf,
        row: usize,
        found: &'static str,
    },

    /// Configuration parsed but failed validation.
    #[error("Invalid table configuration in {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
