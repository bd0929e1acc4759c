//! Integration tests for delimited export.

use chrono::NaiveDate;
use donor_export::{
    DateLocale, ExportError, ExportOptions, Quoting, export_all, export_delimited, export_view,
};
use donor_model::{ColumnDescriptor, QueryState, Record, SortSpec, TableConfig};

fn donations() -> Vec<Record> {
    let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
    vec![
        Record::new()
            .with("name", "Dan Levi")
            .with("amount", 50.0)
            .with("donated_at", day(1, 15))
            .with("status", "paid"),
        Record::new()
            .with("name", "Ann Cohen")
            .with("amount", Option::<f64>::None)
            .with("donated_at", day(2, 3))
            .with("status", "pending"),
        Record::new()
            .with("name", "Eve Mizrahi")
            .with("amount", 180.5)
            .with("status", "paid"),
    ]
}

fn donation_config() -> TableConfig {
    TableConfig::new(vec![
        ColumnDescriptor::text("name", "Name"),
        ColumnDescriptor::number("amount", "Amount"),
        ColumnDescriptor::date("donated_at", "Donated"),
        ColumnDescriptor::select("status", "Status", ["paid", "pending", "failed"]),
    ])
}

#[test]
fn single_column_export_joins_rows_with_newlines() {
    let records = vec![
        Record::new().with("name", "A"),
        Record::new().with("name", "B"),
    ];
    let config = TableConfig::new(vec![ColumnDescriptor::text("name", "Name")]);
    let text = export_all(&records, &config, &ExportOptions::default()).unwrap();
    assert_eq!(text, "Name\nA\nB");
}

#[test]
fn empty_records_yield_header_only() {
    let text = export_all(&[], &donation_config(), &ExportOptions::default()).unwrap();
    assert_eq!(text, "Name,Amount,Donated,Status");
}

#[test]
fn full_export_renders_dates_and_missing_values() {
    let text = export_all(&donations(), &donation_config(), &ExportOptions::default()).unwrap();
    insta::assert_snapshot!(text, @r"
    Name,Amount,Donated,Status
    Dan Levi,50,1/15/2024,paid
    Ann Cohen,,2/3/2024,pending
    Eve Mizrahi,180.5,,paid
    ");
}

#[test]
fn view_export_applies_query_state() {
    let state = QueryState::new()
        .with_filter("status", "paid")
        .with_sort(SortSpec::descending("amount"));
    let options = ExportOptions::new()
        .with_delimiter(b';')
        .with_locale(DateLocale::HeIl);
    let text = export_view(&donations(), &donation_config(), &state, &options).unwrap();
    insta::assert_snapshot!(text, @r"
    Name;Amount;Donated;Status
    Eve Mizrahi;180.5;;paid
    Dan Levi;50;15.1.2024;paid
    ");
}

#[test]
fn full_export_ignores_query_state() {
    let records = donations();
    let config = donation_config();
    let view = export_view(
        &records,
        &config,
        &QueryState::new().with_search("zzz"),
        &ExportOptions::default(),
    )
    .unwrap();
    assert_eq!(view, "Name,Amount,Donated,Status");
    let all = export_all(&records, &config, &ExportOptions::default()).unwrap();
    assert_eq!(all.lines().count(), 4);
}

#[test]
fn verbatim_mode_does_not_escape_delimiters() {
    let records = vec![Record::new().with("name", "Cohen, Ann")];
    let config = TableConfig::new(vec![ColumnDescriptor::text("name", "Name")]);
    let text = export_all(&records, &config, &ExportOptions::default()).unwrap();
    assert_eq!(text, "Name\nCohen, Ann");
}

#[test]
fn rfc4180_mode_quotes_and_round_trips() {
    let records = vec![
        Record::new()
            .with("name", "Cohen, Ann")
            .with("note", "said \"thanks\""),
        Record::new().with("name", "Dan").with("note", "line one\nline two"),
    ];
    let config = TableConfig::new(vec![
        ColumnDescriptor::text("name", "Name"),
        ColumnDescriptor::text("note", "Note"),
    ]);
    let options = ExportOptions::new().with_quoting(Quoting::Rfc4180);
    let text = export_all(&records, &config, &options).unwrap();
    assert!(!text.ends_with('\n'));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Cohen, Ann");
    assert_eq!(&rows[0][1], "said \"thanks\"");
    assert_eq!(&rows[1][1], "line one\nline two");
}

#[test]
fn export_is_refused_when_disabled() {
    let config = donation_config().with_exportable(false);
    let result = export_delimited(&donations(), &config, &ExportOptions::default());
    assert!(matches!(result, Err(ExportError::Disabled)));
}

#[test]
fn formatter_does_not_leak_into_export() {
    let records = vec![Record::new().with("amount", 50.0)];
    let config = TableConfig::new(vec![ColumnDescriptor::number("amount", "Amount").with_format(
        donor_model::CellFormatter::new(|value, _| format!("ILS {value}")),
    )]);
    let text = export_all(&records, &config, &ExportOptions::default()).unwrap();
    assert_eq!(text, "Amount\n50");
}
