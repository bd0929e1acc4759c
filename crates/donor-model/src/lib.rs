//! Data model for configuration-driven donor tables.

pub mod column;
pub mod config;
pub mod error;
pub mod query;
pub mod value;

pub use column::{CellFormatter, ColumnDescriptor, ColumnType};
pub use config::TableConfig;
pub use error::{ModelError, Result};
pub use query::{QueryState, SortDirection, SortSpec};
pub use value::{Record, Value, parse_date_text};
