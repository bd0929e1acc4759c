//! Property tests for the query pipeline.

use donor_model::{ColumnDescriptor, QueryState, Record, SortSpec, TableConfig, Value};
use donor_query::{apply_query, paginate};
use proptest::prelude::*;

fn config() -> TableConfig {
    TableConfig::new(vec![
        ColumnDescriptor::text("name", "Name"),
        ColumnDescriptor::number("amount", "Amount"),
        ColumnDescriptor::text("city", "City"),
    ])
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (0i32..200).prop_map(Value::from),
        "[a-cA-C]{0,4}".prop_map(Value::from),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    (arb_value(), arb_value(), "[a-cA-C]{0,4}").prop_map(|(name, amount, city)| {
        Record::new()
            .with("name", name)
            .with("amount", amount)
            .with("city", city)
    })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..24)
}

fn stringified(record: &Record, key: &str) -> Option<String> {
    record.get(key).map(|value| value.to_string().to_lowercase())
}

/// Position of `record` in `records`, by address.
fn input_index(records: &[Record], record: &Record) -> usize {
    records
        .iter()
        .position(|candidate| std::ptr::eq(candidate, record))
        .expect("view row comes from input")
}

proptest! {
    #[test]
    fn search_results_are_exactly_the_matching_records(
        records in arb_records(),
        term in "[a-cA-C0-9]{1,2}",
    ) {
        let state = QueryState::new().with_search(term.clone());
        let view = apply_query(&records, &config(), &state);
        let needle = term.to_lowercase();
        let matches = |record: &Record| {
            ["name", "amount", "city"]
                .iter()
                .any(|key| stringified(record, key).is_some_and(|text| text.contains(&needle)))
        };
        for record in &view {
            prop_assert!(matches(record));
        }
        let expected = records.iter().filter(|record| matches(record)).count();
        prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn filters_hold_for_every_result(
        records in arb_records(),
        name in "[a-c]{1,2}",
        city in "[a-c]{0,1}",
    ) {
        let state = QueryState::new()
            .with_filter("name", name.clone())
            .with_filter("city", city.clone());
        let view = apply_query(&records, &config(), &state);
        for record in &view {
            let value = stringified(record, "name");
            prop_assert!(value.is_some_and(|text| text.contains(&name)));
            if !city.is_empty() {
                let value = stringified(record, "city");
                prop_assert!(value.is_some_and(|text| text.contains(&city)));
            }
        }
    }

    #[test]
    fn sort_is_stable_with_missing_values_last(
        records in arb_records(),
        descending in any::<bool>(),
        key in prop::sample::select(vec!["name", "amount"]),
    ) {
        let spec = if descending {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        };
        let state = QueryState::new().with_sort(spec);
        let config = config();
        let view = apply_query(&records, &config, &state);
        prop_assert_eq!(view.len(), records.len());

        let first_missing = view.iter().position(|record| record.get(key).is_none());
        if let Some(start) = first_missing {
            prop_assert!(view[start..].iter().all(|record| record.get(key).is_none()));
        }

        let column_type = config.column(key).map(|column| column.column_type).unwrap_or_default();
        for pair in view.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let tied = match (left.get(key), right.get(key)) {
                (Some(a), Some(b)) => {
                    donor_query::compare_values(column_type, a, b) == std::cmp::Ordering::Equal
                }
                (None, None) => true,
                _ => false,
            };
            if tied {
                prop_assert!(input_index(&records, left) < input_index(&records, right));
            }
        }
    }

    #[test]
    fn apply_query_is_idempotent(
        records in arb_records(),
        term in "[a-c]{0,1}",
    ) {
        let state = QueryState::new()
            .with_search(term)
            .with_sort(SortSpec::descending("amount"));
        let first = apply_query(&records, &config(), &state);
        let second = apply_query(&records, &config(), &state);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pages_concatenate_to_the_view(
        records in arb_records(),
        page_size in 1usize..7,
    ) {
        let view = apply_query(&records, &config(), &QueryState::new());
        let total_pages = paginate(&view, 1, page_size).total_pages;
        let mut joined = Vec::new();
        for number in 1..=total_pages {
            joined.extend_from_slice(paginate(&view, number, page_size).rows);
        }
        prop_assert_eq!(joined, view);
    }
}
