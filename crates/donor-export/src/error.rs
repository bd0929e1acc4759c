//! Error types for export operations.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The table configuration has export switched off.
    #[error("export is disabled for this table")]
    Disabled,

    /// The CSV writer failed while quoting fields.
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer could not be flushed into its buffer.
    #[error("failed to finish csv output: {0}")]
    Flush(#[from] std::io::Error),

    /// Quoted output was not valid UTF-8.
    #[error("export produced invalid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
