//! Stable single-column sort with missing values last.

use std::cmp::Ordering;

use donor_model::{Record, SortSpec, TableConfig};
use tracing::warn;

use crate::compare::{CompareStrategy, compare_within_group};

/// Sort `records` by `spec`.
///
/// Missing values go after defined ones in both directions, and values of
/// the column's native kind go before values of other kinds in both
/// directions. The direction only reverses the order within a kind group.
/// Equal keys keep their input order. A spec naming an unknown or non-sortable column leaves the order
/// unchanged.
pub fn sort_records<'a>(
    mut records: Vec<&'a Record>,
    config: &TableConfig,
    spec: &SortSpec,
) -> Vec<&'a Record> {
    let Some(column) = config.sortable_column(&spec.column) else {
        warn!(column = %spec.column, "sort requested on unknown or non-sortable column");
        return records;
    };
    let strategy = CompareStrategy::for_type(column.column_type);
    let descending = spec.direction.is_descending();
    let key = column.key.as_str();

    // `sort_by` is stable, which the tie-break rule depends on.
    records.sort_by(|left, right| match (left.get(key), right.get(key)) {
        (Some(a), Some(b)) => strategy.group(a).cmp(&strategy.group(b)).then_with(|| {
            let ordering = compare_within_group(a, b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    records
}
