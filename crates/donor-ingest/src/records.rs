//! Record loading from JSON and CSV files.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use donor_model::{Record, TableConfig};

use crate::coerce::{coerce_cell, coerce_json};
use crate::error::{IngestError, Result};

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    /// Detect the format from the file extension.
    pub fn detect(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Ok(RecordFormat::Json),
            Some("csv") => Ok(RecordFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                expected: ".json or .csv",
            }),
        }
    }
}

/// Load records from `path`, coercing fields by the column types of
/// `config`.
pub fn load_records(path: &Path, config: &TableConfig) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let records = match RecordFormat::detect(path)? {
        RecordFormat::Json => {
            let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json_records(&text, config, path)?
        }
        RecordFormat::Csv => {
            let file = fs::File::open(path).map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv_records(file, config, path)?
        }
    };
    debug!(
        path = %path.display(),
        rows = records.len(),
        "loaded records"
    );
    warn_on_type_mismatches(&records, config);
    Ok(records)
}

/// Count, per typed column, the cells that did not parse as the declared
/// type. Returns `(column key, count)` for columns with at least one.
pub fn type_mismatches<'c>(
    records: &[Record],
    config: &'c TableConfig,
) -> Vec<(&'c str, usize)> {
    config
        .columns
        .iter()
        .filter(|column| !column.column_type.is_textual())
        .filter_map(|column| {
            let expected = column.column_type.as_str();
            let count = records
                .iter()
                .filter_map(|record| record.get(&column.key))
                .filter(|value| value.kind() != expected)
                .count();
            (count > 0).then_some((column.key.as_str(), count))
        })
        .collect()
}

fn warn_on_type_mismatches(records: &[Record], config: &TableConfig) {
    for (column, count) in type_mismatches(records, config) {
        warn!(column, count, "cells do not match the declared column type");
    }
}

/// Parse a JSON array of objects.
///
/// `origin` is only used in error messages.
pub fn parse_json_records(text: &str, config: &TableConfig, origin: &Path) -> Result<Vec<Record>> {
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|source| IngestError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
    let rows = match parsed {
        serde_json::Value::Array(rows) => rows,
        other => {
            return Err(IngestError::NotAnObject {
                path: origin.to_path_buf(),
                row: 0,
                found: json_kind(&other),
            });
        }
    };
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let serde_json::Value::Object(fields) = row else {
                return Err(IngestError::NotAnObject {
                    path: origin.to_path_buf(),
                    row: index + 1,
                    found: json_kind(row),
                });
            };
            Ok(fields
                .iter()
                .map(|(key, value)| {
                    let column_type = config.column(key).map(|column| column.column_type);
                    (key.clone(), coerce_json(value, column_type))
                })
                .collect())
        })
        .collect()
}

/// Read CSV rows with a header line.
///
/// Headers are trimmed and stripped of a byte-order mark. Empty cells become
/// missing values.
pub fn read_csv_records<R: Read>(
    reader: R,
    config: &TableConfig,
    origin: &Path,
) -> Result<Vec<Record>> {
    let csv_error = |source| IngestError::CsvRead {
        path: PathBuf::from(origin),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim().trim_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;
        if row.len() != headers.len() {
            warn!(
                row = index + 1,
                expected = headers.len(),
                found = row.len(),
                "csv row width differs from header"
            );
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(key, raw)| {
                let column_type = config.column(key).map(|column| column.column_type);
                (key.clone(), coerce_cell(raw, column_type))
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
