//! Coercion of raw cells into typed values.
//!
//! Cells are converted according to the declared type of their column.
//! Anything that does not parse stays text; the query engine copes with
//! mismatched values, so ingest never rejects a row over a bad cell.

use donor_model::{ColumnType, Value, parse_date_text};

/// Coerce a CSV cell. Empty cells become `Null`.
pub fn coerce_cell(raw: &str, column_type: Option<ColumnType>) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    coerce_text(trimmed, column_type)
}

/// Coerce a non-empty text value by declared type.
pub fn coerce_text(text: &str, column_type: Option<ColumnType>) -> Value {
    let parsed = match column_type {
        Some(ColumnType::Number) => parse_number(text).map(Value::Number),
        Some(ColumnType::Date) => parse_date_text(text).map(Value::Date),
        Some(ColumnType::Boolean) => parse_bool(text).map(Value::Bool),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::Text(text.to_string()))
}

/// Convert a JSON value, coercing strings by declared type.
pub fn coerce_json(value: &serde_json::Value, column_type: Option<ColumnType>) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(flag) => Value::Bool(*flag),
        serde_json::Value::Number(number) => number
            .as_f64()
            .map_or_else(|| Value::Text(number.to_string()), Value::Number),
        serde_json::Value::String(text) if text.trim().is_empty() => Value::Text(text.clone()),
        serde_json::Value::String(text) => coerce_text(text.trim(), column_type),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Value::Text(value.to_string())
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_or_stay_text() {
        assert_eq!(coerce_cell(" 50 ", Some(ColumnType::Number)), Value::Number(50.0));
        assert_eq!(
            coerce_cell("n/a", Some(ColumnType::Number)),
            Value::Text("n/a".to_string())
        );
        assert_eq!(
            coerce_cell("NaN", Some(ColumnType::Number)),
            Value::Text("NaN".to_string())
        );
    }

    #[test]
    fn empty_cells_are_null() {
        assert_eq!(coerce_cell("   ", Some(ColumnType::Text)), Value::Null);
        assert_eq!(coerce_cell("", None), Value::Null);
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(coerce_cell("Yes", Some(ColumnType::Boolean)), Value::Bool(true));
        assert_eq!(coerce_cell("0", Some(ColumnType::Boolean)), Value::Bool(false));
    }

    #[test]
    fn text_columns_keep_numeric_looking_text() {
        assert_eq!(
            coerce_cell("0501234567", Some(ColumnType::Phone)),
            Value::Text("0501234567".to_string())
        );
    }

    #[test]
    fn json_values_keep_native_kinds() {
        let value = serde_json::json!(12.5);
        assert_eq!(coerce_json(&value, Some(ColumnType::Text)), Value::Number(12.5));
        let value = serde_json::json!("2024-01-15");
        assert!(matches!(
            coerce_json(&value, Some(ColumnType::Date)),
            Value::Date(_)
        ));
        let value = serde_json::json!({"fund": "general"});
        assert_eq!(
            coerce_json(&value, None),
            Value::Text("{\"fund\":\"general\"}".to_string())
        );
    }
}
