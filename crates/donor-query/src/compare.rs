//! Value comparison strategies.
//!
//! Each declared column type maps to one strategy. Values are first grouped
//! by kind: the strategy's native kind comes first, the other kinds follow
//! in a fixed order (numbers, dates, booleans, text). Inside a group values
//! compare natively, so numbers stay numeric even under a `text` column and
//! stray text in a `number` column compares as strings after the numbers.
//! Grouping by kind keeps the order total, which `sort_by` relies on.

use std::cmp::Ordering;

use donor_model::{ColumnType, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareStrategy {
    /// Numbers by value.
    Numeric,
    /// Dates by time.
    Chronological,
    /// `false` before `true`.
    Boolean,
    /// Text byte-wise.
    Lexicographic,
}

impl CompareStrategy {
    pub fn for_type(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Number => CompareStrategy::Numeric,
            ColumnType::Date => CompareStrategy::Chronological,
            ColumnType::Boolean => CompareStrategy::Boolean,
            ColumnType::Text | ColumnType::Email | ColumnType::Phone | ColumnType::Select => {
                CompareStrategy::Lexicographic
            }
        }
    }

    fn native_kind(self) -> u8 {
        match self {
            CompareStrategy::Numeric => KIND_NUMBER,
            CompareStrategy::Chronological => KIND_DATE,
            CompareStrategy::Boolean => KIND_BOOL,
            CompareStrategy::Lexicographic => KIND_TEXT,
        }
    }

    /// Group of `value` under this strategy; lower groups sort first.
    ///
    /// The native kind is group 0. Direction never changes the group order.
    pub fn group(self, value: &Value) -> u8 {
        let kind = kind_rank(value);
        if kind == self.native_kind() { 0 } else { kind + 1 }
    }

    /// Compare two defined values.
    pub fn compare(self, left: &Value, right: &Value) -> Ordering {
        self.group(left)
            .cmp(&self.group(right))
            .then_with(|| compare_within_group(left, right))
    }
}

const KIND_NUMBER: u8 = 0;
const KIND_DATE: u8 = 1;
const KIND_BOOL: u8 = 2;
const KIND_TEXT: u8 = 3;
const KIND_NULL: u8 = 4;

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => KIND_NUMBER,
        Value::Date(_) => KIND_DATE,
        Value::Bool(_) => KIND_BOOL,
        Value::Text(_) => KIND_TEXT,
        Value::Null => KIND_NULL,
    }
}

/// Native comparison of two values from the same group.
///
/// `-0.0` and `0.0` are equal; NaN falls back to `total_cmp` so it still has
/// a fixed place.
pub fn compare_within_group(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
        }
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => left.to_string().cmp(&right.to_string()),
    }
}

/// Compare two defined values using the strategy for `column_type`.
pub fn compare_values(column_type: ColumnType, left: &Value, right: &Value) -> Ordering {
    CompareStrategy::for_type(column_type).compare(left, right)
}
