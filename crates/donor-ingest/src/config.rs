//! Table configuration files.
//!
//! Configurations are written in TOML (preferred for hand-edited files) or
//! JSON (what a settings panel saves). Both are validated after parsing.

use std::fs;
use std::path::Path;

use tracing::debug;

use donor_model::TableConfig;

use crate::error::{IngestError, Result};

/// Load and validate a table configuration from `.toml` or `.json`.
pub fn load_table_config(path: &Path) -> Result<TableConfig> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    let config: TableConfig = match extension.as_deref() {
        Some("toml") => toml::from_str(&text).map_err(|source| IngestError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
        Some("json") => serde_json::from_str(&text).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                expected: ".toml or .json",
            });
        }
    };
    config
        .validate()
        .map_err(|source| IngestError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        columns = config.columns.len(),
        "loaded table configuration"
    );
    Ok(config)
}
