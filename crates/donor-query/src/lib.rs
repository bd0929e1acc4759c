//! Tabular query engine.
//!
//! Turns `(records, configuration, query state)` into an ordered view:
//! search, then filter, then sort. All functions are pure; the input records
//! are never mutated and every call returns a fresh view.

pub mod compare;
pub mod engine;
pub mod filter;
pub mod page;
pub mod search;
pub mod sort;

pub use compare::{CompareStrategy, compare_values, compare_within_group};
pub use engine::{QueryEngine, apply_query};
pub use filter::{filter_records, matches_filters};
pub use page::{Page, paginate};
pub use search::{matches_search, search_records};
pub use sort::sort_records;
