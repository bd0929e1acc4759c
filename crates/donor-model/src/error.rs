use thiserror::Error;

/// Problems found when validating a table configuration.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("column key must not be empty (label '{label}')")]
    EmptyColumnKey { label: String },
    #[error("duplicate column key '{key}'")]
    DuplicateColumn { key: String },
    #[error("select column '{key}' has no options")]
    MissingOptions { key: String },
    #[error("unknown column type '{0}'")]
    UnknownColumnType(String),
    #[error("unknown sort direction '{0}'")]
    UnknownSortDirection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
