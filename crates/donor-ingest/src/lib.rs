//! Donor table ingestion: record files and table configuration files.

pub mod coerce;
pub mod config;
pub mod error;
pub mod records;

pub use coerce::{coerce_cell, coerce_json, coerce_text};
pub use config::load_table_config;
pub use error::{IngestError, Result};
pub use records::{
    RecordFormat, load_records, parse_json_records, read_csv_records, type_mismatches,
};
