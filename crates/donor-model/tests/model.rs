//! Tests for donor-model types.

use donor_model::{
    ColumnDescriptor, ColumnType, ModelError, QueryState, Record, SortDirection, SortSpec,
    TableConfig, Value,
};

fn donor_config() -> TableConfig {
    TableConfig::new(vec![
        ColumnDescriptor::text("name", "Name").with_required(true),
        ColumnDescriptor::number("amount", "Amount"),
        ColumnDescriptor::date("donated_at", "Donated"),
        ColumnDescriptor::select("status", "Status", ["paid", "pending", "failed"]),
    ])
}

#[test]
fn edits_produce_new_configuration() {
    let original = donor_config();
    let edited = original
        .clone()
        .rename_column("name", "Donor")
        .retype_column("amount", ColumnType::Text)
        .without_column("status")
        .with_exportable(false);

    assert_eq!(original.column("name").unwrap().label, "Name");
    assert_eq!(original.columns.len(), 4);
    assert!(original.exportable);

    assert_eq!(edited.column("name").unwrap().label, "Donor");
    assert_eq!(edited.column("amount").unwrap().column_type, ColumnType::Text);
    assert!(edited.column("status").is_none());
    assert!(!edited.exportable);
}

#[test]
fn edits_on_unknown_keys_are_ignored() {
    let config = donor_config()
        .rename_column("nope", "Nope")
        .retype_column("nope", ColumnType::Date)
        .without_column("nope");
    assert_eq!(config, donor_config());
}

#[test]
fn labels_follow_declared_order() {
    let config = donor_config();
    let labels: Vec<&str> = config.labels().collect();
    assert_eq!(labels, vec!["Name", "Amount", "Donated", "Status"]);
}

#[test]
fn config_deserializes_from_toml_with_defaults() {
    let source = r#"
searchable = false

[[columns]]
key = "name"
label = "Name"

[[columns]]
key = "amount"
label = "Amount"
type = "number"
sortable = false

[[columns]]
key = "status"
label = "Status"
type = "select"
options = ["paid", "pending"]
"#;
    let config: TableConfig = toml::from_str(source).expect("parse toml");
    assert!(!config.searchable);
    assert!(config.sortable);
    assert!(config.exportable);
    assert_eq!(config.columns[0].column_type, ColumnType::Text);
    assert!(config.columns[0].filterable);
    assert!(!config.columns[1].sortable);
    assert_eq!(config.columns[2].options, vec!["paid", "pending"]);
    assert!(config.validate().is_ok());
}

#[test]
fn config_round_trips_through_json() {
    let config = donor_config();
    let json = serde_json::to_string(&config).expect("serialize config");
    let round: TableConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(round, config);
}

#[test]
fn validate_reports_select_without_options() {
    let config = TableConfig::new(vec![ColumnDescriptor::new(
        "fund",
        "Fund",
        ColumnType::Select,
    )]);
    assert_eq!(
        config.validate(),
        Err(ModelError::MissingOptions {
            key: "fund".to_string()
        })
    );
}

#[test]
fn validate_reports_empty_key() {
    let config = TableConfig::new(vec![ColumnDescriptor::text(" ", "Blank")]);
    assert!(matches!(
        config.validate(),
        Err(ModelError::EmptyColumnKey { .. })
    ));
}

#[test]
fn query_state_serializes() {
    let state = QueryState::new()
        .with_search("cohen")
        .with_filter("status", "paid")
        .with_sort(SortSpec::new("amount", SortDirection::Descending));
    let json = serde_json::to_value(&state).expect("serialize state");
    assert_eq!(json["sort"]["direction"], "descending");
    assert_eq!(json["filters"]["status"], "paid");
}

#[test]
fn sort_direction_parses_short_and_long_forms() {
    assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
    assert_eq!("Ascending".parse::<SortDirection>(), Ok(SortDirection::Ascending));
    assert!("sideways".parse::<SortDirection>().is_err());
}

#[test]
fn record_collects_from_pairs() {
    let record: Record = [("name", Value::from("Dan")), ("amount", Value::from(50.0))]
        .into_iter()
        .collect();
    assert!(record.contains("name"));
    assert_eq!(record.get("amount"), Some(&Value::Number(50.0)));
}
