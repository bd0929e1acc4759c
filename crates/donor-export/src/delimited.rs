//! Delimited-text export.
//!
//! Output is a header row of column labels followed by one row per record.
//! Fields are joined by the delimiter and rows by `\n`, with no trailing
//! newline.
//!
//! By default fields are written as-is: a value containing the delimiter or a
//! line break will shift or split its row. [`Quoting::Rfc4180`] opts into
//! proper CSV quoting through the `csv` writer.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use donor_model::{
    ColumnDescriptor, ColumnType, QueryState, Record, TableConfig, Value, parse_date_text,
};
use donor_query::apply_query;

use crate::date::DateLocale;
use crate::error::{ExportError, Result};

/// MIME type of the exported text.
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// How fields containing special characters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Write every field verbatim.
    #[default]
    None,
    /// Quote fields containing the delimiter, quotes or line breaks.
    Rfc4180,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field separator; a single ASCII byte.
    pub delimiter: u8,
    pub quoting: Quoting,
    /// Layout for `date` columns.
    pub locale: DateLocale,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quoting: Quoting::None,
            locale: DateLocale::default(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }
}

/// Render one exported field.
///
/// `date` columns go through locale formatting when the value is a date or
/// ISO-parseable text; everything else uses the natural string form. Missing
/// values render empty. Column formatters are not applied.
pub fn render_field(column: &ColumnDescriptor, record: &Record, locale: DateLocale) -> String {
    let Some(value) = record.get(&column.key) else {
        return String::new();
    };
    if column.column_type == ColumnType::Date {
        let date = match value {
            Value::Date(date) => Some(*date),
            Value::Text(text) => parse_date_text(text),
            _ => None,
        };
        if let Some(date) = date {
            return locale.format_date(date.date());
        }
    }
    value.to_string()
}

/// Serialize `records` using the columns of `config`.
///
/// # Errors
///
/// Returns [`ExportError::Disabled`] when the configuration is not
/// exportable, or a writer error in RFC 4180 mode.
pub fn export_delimited<'r, I>(
    records: I,
    config: &TableConfig,
    options: &ExportOptions,
) -> Result<String>
where
    I: IntoIterator<Item = &'r Record>,
{
    if !config.exportable {
        return Err(ExportError::Disabled);
    }
    let header: Vec<String> = config.labels().map(str::to_string).collect();
    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|record| {
            config
                .columns
                .iter()
                .map(|column| render_field(column, record, options.locale))
                .collect()
        })
        .collect();
    debug!(
        rows = rows.len(),
        columns = header.len(),
        quoting = ?options.quoting,
        "rendering export"
    );
    match options.quoting {
        Quoting::None => Ok(join_verbatim(&header, &rows, options.delimiter)),
        Quoting::Rfc4180 => write_quoted(&header, &rows, options.delimiter),
    }
}

/// Export the full data set, ignoring any query state.
pub fn export_all(
    records: &[Record],
    config: &TableConfig,
    options: &ExportOptions,
) -> Result<String> {
    export_delimited(records, config, options)
}

/// Export the current view: search, filter and sort from `state` apply.
pub fn export_view(
    records: &[Record],
    config: &TableConfig,
    state: &QueryState,
    options: &ExportOptions,
) -> Result<String> {
    let view = apply_query(records, config, state);
    export_delimited(view, config, options)
}

/// File name for a saved export, e.g. `donors-2024-01-15.csv`.
pub fn export_file_name(stem: &str, date: NaiveDate) -> String {
    format!("{stem}-{}.csv", date.format("%Y-%m-%d"))
}

fn join_verbatim(header: &[String], rows: &[Vec<String>], delimiter: u8) -> String {
    let separator = char::from(delimiter).to_string();
    std::iter::once(header.join(separator.as_str()))
        .chain(rows.iter().map(|row| row.join(separator.as_str())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_quoted(header: &[String], rows: &[Vec<String>], delimiter: u8) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
