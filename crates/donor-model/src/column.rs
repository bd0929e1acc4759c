//! Column descriptors.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::value::{Record, Value};

/// Declared type of a column.
///
/// The type drives default presentation, date rendering on export and the
/// comparison strategy used for sorting. It is a declaration, not a
/// guarantee: a `Number` column may still hold text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    Email,
    Phone,
    /// Closed value universe given by the column's `options`.
    Select,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::Email => "email",
            ColumnType::Phone => "phone",
            ColumnType::Select => "select",
        }
    }

    /// Returns true for the types whose values are plain strings.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ColumnType::Text | ColumnType::Email | ColumnType::Phone | ColumnType::Select
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(ColumnType::Text),
            "number" | "numeric" => Ok(ColumnType::Number),
            "date" | "datetime" => Ok(ColumnType::Date),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            "email" => Ok(ColumnType::Email),
            "phone" | "tel" => Ok(ColumnType::Phone),
            "select" => Ok(ColumnType::Select),
            _ => Err(ModelError::UnknownColumnType(s.to_string())),
        }
    }
}

type FormatFn = dyn Fn(&Value, &Record) -> String + Send + Sync;

/// Presentation callback attached to a column.
///
/// Formatters only affect how a cell is displayed. Search, filter, sort and
/// export always read the raw value.
#[derive(Clone)]
pub struct CellFormatter(Arc<FormatFn>);

impl CellFormatter {
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(&Value, &Record) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(format))
    }

    pub fn format(&self, value: &Value, record: &Record) -> String {
        (self.0)(value, record)
    }
}

impl fmt::Debug for CellFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellFormatter(..)")
    }
}

impl PartialEq for CellFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn default_true() -> bool {
    true
}

/// Describes one projectable, queryable field of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field name within a record; unique within a configuration.
    pub key: String,
    /// Display name, also the export header.
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Allowed values for `select` columns, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Presentation hint only; never enforced by the engine.
    #[serde(default)]
    pub required: bool,
    #[serde(skip)]
    pub format: Option<CellFormatter>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            options: Vec::new(),
            sortable: true,
            filterable: true,
            required: false,
            format: None,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Number)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Date)
    }

    pub fn select<I, S>(key: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(key, label, ColumnType::Select).with_options(options)
    }

    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: CellFormatter) -> Self {
        self.format = Some(format);
        self
    }

    /// Returns true when `value` belongs to this column's value universe.
    ///
    /// Only `select` columns restrict their values.
    pub fn allows(&self, value: &str) -> bool {
        self.column_type != ColumnType::Select || self.options.iter().any(|option| option == value)
    }

    /// Render the cell for display, applying the formatter when present.
    pub fn display(&self, record: &Record) -> String {
        let value = record.get(&self.key).unwrap_or(&Value::Null);
        match &self.format {
            Some(format) => format.format(value, record),
            None => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_from_str() {
        assert_eq!("Number".parse::<ColumnType>().unwrap(), ColumnType::Number);
        assert_eq!("tel".parse::<ColumnType>().unwrap(), ColumnType::Phone);
        assert!("currency".parse::<ColumnType>().is_err());
    }

    #[test]
    fn formatter_only_changes_display() {
        let column = ColumnDescriptor::number("amount", "Amount")
            .with_format(CellFormatter::new(|value, _| format!("₪{value}")));
        let record = Record::new().with("amount", 50.0);
        assert_eq!(column.display(&record), "₪50");
        assert_eq!(record.get("amount"), Some(&Value::Number(50.0)));
    }

    #[test]
    fn select_allows_only_listed_options() {
        let column = ColumnDescriptor::select("status", "Status", ["paid", "pending"]);
        assert!(column.allows("paid"));
        assert!(!column.allows("refunded"));
        assert!(ColumnDescriptor::text("name", "Name").allows("anything"));
    }
}
