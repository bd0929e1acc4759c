//! Per-column substring filters.

use std::collections::BTreeMap;

use donor_model::{Record, TableConfig};
use tracing::trace;

/// A filter that survived resolution against the configuration.
struct ActiveFilter<'a> {
    key: &'a str,
    needle: String,
}

fn resolve<'a>(config: &TableConfig, filters: &'a BTreeMap<String, String>) -> Vec<ActiveFilter<'a>> {
    filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(key, value)| {
            if config.filterable_column(key).is_none() {
                trace!(column = %key, "ignoring filter on unknown or non-filterable column");
                return None;
            }
            Some(ActiveFilter {
                key: key.as_str(),
                needle: value.to_lowercase(),
            })
        })
        .collect()
}

fn matches_resolved(record: &Record, filters: &[ActiveFilter<'_>]) -> bool {
    filters.iter().all(|filter| {
        record
            .get(filter.key)
            .is_some_and(|value| value.to_string().to_lowercase().contains(&filter.needle))
    })
}

/// Returns true if `record` passes every active filter.
///
/// A missing field fails its filter. Entries naming unknown or
/// non-filterable columns are ignored.
pub fn matches_filters(
    record: &Record,
    config: &TableConfig,
    filters: &BTreeMap<String, String>,
) -> bool {
    matches_resolved(record, &resolve(config, filters))
}

/// Keep the records passing all active filters (logical AND).
pub fn filter_records<'a>(
    records: Vec<&'a Record>,
    config: &TableConfig,
    filters: &BTreeMap<String, String>,
) -> Vec<&'a Record> {
    let active = resolve(config, filters);
    if active.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches_resolved(record, &active))
        .collect()
}
