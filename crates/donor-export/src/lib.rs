//! Delimited-text export of donor tables.

pub mod date;
pub mod delimited;
pub mod error;

pub use date::DateLocale;
pub use delimited::{
    EXPORT_MIME_TYPE, ExportOptions, Quoting, export_all, export_delimited, export_file_name,
    export_view, render_field,
};
pub use error::{ExportError, Result};
