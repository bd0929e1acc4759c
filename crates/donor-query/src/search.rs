//! Free-text search across all configured columns.

use donor_model::{Record, TableConfig};

/// Returns true if any configured column's defined value contains
/// `needle_lower` case-insensitively. `needle_lower` must already be
/// lowercased.
pub fn matches_search(record: &Record, config: &TableConfig, needle_lower: &str) -> bool {
    config.columns.iter().any(|column| {
        record
            .get(&column.key)
            .is_some_and(|value| value.to_string().to_lowercase().contains(needle_lower))
    })
}

/// Keep the records matching `term`. Inactive when the configuration is not
/// searchable or the term is empty.
pub fn search_records<'a>(
    records: Vec<&'a Record>,
    config: &TableConfig,
    term: &str,
) -> Vec<&'a Record> {
    if !config.searchable || term.is_empty() {
        return records;
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_search(record, config, &needle))
        .collect()
}
