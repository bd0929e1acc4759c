//! Table configuration.
//!
//! A [`TableConfig`] is an immutable value. Edits made through a settings
//! panel (add, remove, rename or retype a column, flip a feature toggle)
//! produce a new configuration through the `with_*` methods; nothing holds a
//! reference to the previous one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnDescriptor, ColumnType};
use crate::error::{ModelError, Result};

fn default_true() -> bool {
    true
}

/// Ordered column descriptors plus the four feature toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    /// Free-text search across all columns.
    #[serde(default = "default_true")]
    pub searchable: bool,
    /// Master switch: when false no column sorts.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Master switch for per-column filters.
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Enables delimited export.
    #[serde(default = "default_true")]
    pub exportable: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            searchable: true,
            sortable: true,
            filterable: true,
            exportable: true,
        }
    }
}

impl TableConfig {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.key.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.label.as_str())
    }

    /// Returns the column if sorting on it is allowed by both the master
    /// switch and the column flag.
    pub fn sortable_column(&self, key: &str) -> Option<&ColumnDescriptor> {
        if !self.sortable {
            return None;
        }
        self.column(key).filter(|column| column.sortable)
    }

    /// Returns the column if a filter on it is allowed by both the master
    /// switch and the column flag.
    pub fn filterable_column(&self, key: &str) -> Option<&ColumnDescriptor> {
        if !self.filterable {
            return None;
        }
        self.column(key).filter(|column| column.filterable)
    }

    /// Adds a column, or replaces the column with the same key in place.
    #[must_use]
    pub fn with_column(mut self, column: ColumnDescriptor) -> Self {
        match self.position(&column.key) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        self
    }

    #[must_use]
    pub fn without_column(mut self, key: &str) -> Self {
        self.columns.retain(|column| column.key != key);
        self
    }

    /// Changes a column's label. Unknown keys leave the configuration as is.
    #[must_use]
    pub fn rename_column(mut self, key: &str, label: impl Into<String>) -> Self {
        if let Some(column) = self.columns.iter_mut().find(|column| column.key == key) {
            column.label = label.into();
        }
        self
    }

    /// Changes a column's declared type. Unknown keys leave the configuration
    /// as is.
    #[must_use]
    pub fn retype_column(mut self, key: &str, column_type: ColumnType) -> Self {
        if let Some(column) = self.columns.iter_mut().find(|column| column.key == key) {
            column.column_type = column_type;
        }
        self
    }

    #[must_use]
    pub fn with_column_options<I, S>(mut self, key: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(column) = self.columns.iter_mut().find(|column| column.key == key) {
            column.options = options.into_iter().map(Into::into).collect();
        }
        self
    }

    #[must_use]
    pub fn with_searchable(mut self, enable: bool) -> Self {
        self.searchable = enable;
        self
    }

    #[must_use]
    pub fn with_sortable(mut self, enable: bool) -> Self {
        self.sortable = enable;
        self
    }

    #[must_use]
    pub fn with_filterable(mut self, enable: bool) -> Self {
        self.filterable = enable;
        self
    }

    #[must_use]
    pub fn with_exportable(mut self, enable: bool) -> Self {
        self.exportable = enable;
        self
    }

    /// Check structural rules for configurations loaded from files.
    ///
    /// The query engine tolerates invalid configurations; this is for
    /// reporting problems to whoever wrote the file.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if column.key.trim().is_empty() {
                return Err(ModelError::EmptyColumnKey {
                    label: column.label.clone(),
                });
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    key: column.key.clone(),
                });
            }
            if column.column_type == ColumnType::Select && column.options.is_empty() {
                return Err(ModelError::MissingOptions {
                    key: column.key.clone(),
                });
            }
        }
        Ok(())
    }
}
