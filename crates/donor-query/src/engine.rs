//! Query pipeline and the stateful engine wrapper.

use donor_model::{QueryState, Record, SortSpec, TableConfig};
use tracing::{debug, debug_span};

use crate::filter::filter_records;
use crate::search::search_records;
use crate::sort::sort_records;

/// Run search, filter and sort, in that order, over `records`.
///
/// Returns references into `records`; the input slice is left untouched.
pub fn apply_query<'a>(
    records: &'a [Record],
    config: &TableConfig,
    state: &QueryState,
) -> Vec<&'a Record> {
    let span = debug_span!("apply_query", input_rows = records.len());
    let _guard = span.enter();

    let view: Vec<&Record> = records.iter().collect();
    let view = search_records(view, config, &state.search_term);
    let after_search = view.len();
    let view = filter_records(view, config, &state.filters);
    let after_filter = view.len();
    let view = match &state.sort {
        Some(spec) => sort_records(view, config, spec),
        None => view,
    };

    debug!(
        after_search,
        after_filter,
        sorted = state.sort.is_some(),
        "query applied"
    );
    view
}

/// A table instance: one configuration plus its transient query state.
///
/// The presentation layer calls the setters on each keystroke or toggle and
/// re-runs [`QueryEngine::apply`]. Dropping the engine discards the state.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    config: TableConfig,
    state: QueryState,
}

impl QueryEngine {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            state: QueryState::default(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: QueryState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Swap in an edited configuration. The previous one is dropped; query
    /// entries referring to removed columns simply stop having an effect.
    pub fn replace_config(&mut self, config: TableConfig) {
        self.config = config;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.state.set_filter(key, value);
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.state.filters.remove(key);
    }

    pub fn set_sort(&mut self, spec: SortSpec) {
        self.state.sort = Some(spec);
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.state.toggle_sort(key);
    }

    pub fn clear_sort(&mut self) {
        self.state.clear_sort();
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        apply_query(records, &self.config, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use donor_model::ColumnDescriptor;

    fn records() -> Vec<Record> {
        vec![
            Record::new().with("name", "Dan").with("amount", 50.0),
            Record::new()
                .with("name", "Ann")
                .with("amount", Option::<f64>::None),
            Record::new().with("name", "Eve").with("amount", 50.0),
        ]
    }

    fn names(view: &[&Record]) -> Vec<String> {
        view.iter()
            .map(|record| record.get("name").map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn engine_state_drives_view() {
        let records = records();
        let mut engine = QueryEngine::new(TableConfig::new(vec![
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::number("amount", "Amount"),
        ]));
        engine.set_filter("name", "e");
        assert_eq!(names(&engine.apply(&records)), vec!["Eve"]);

        engine.clear_filter("name");
        engine.toggle_sort("name");
        engine.toggle_sort("name");
        assert_eq!(names(&engine.apply(&records)), vec!["Eve", "Dan", "Ann"]);

        engine.reset();
        assert_eq!(names(&engine.apply(&records)), vec!["Dan", "Ann", "Eve"]);
    }

    #[test]
    fn replaced_config_drops_removed_columns_from_query() {
        let records = records();
        let config = TableConfig::new(vec![
            ColumnDescriptor::text("name", "Name"),
            ColumnDescriptor::number("amount", "Amount"),
        ]);
        let mut engine = QueryEngine::new(config.clone());
        engine.set_sort(SortSpec::descending("amount"));
        engine.replace_config(config.without_column("amount"));
        assert_eq!(names(&engine.apply(&records)), vec!["Dan", "Ann", "Eve"]);
    }
}
