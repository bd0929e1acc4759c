use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info, info_span};

use donor_export::{
    EXPORT_MIME_TYPE, ExportOptions, Quoting, export_all, export_file_name, export_view,
};
use donor_ingest::{load_records, load_table_config};
use donor_model::{QueryState, Record, SortDirection, SortSpec, TableConfig};
use donor_query::{QueryEngine, paginate};

use crate::cli::{ColumnsArgs, ExportArgs, QueryArgs, SourceArgs, ViewArgs};
use crate::logging::redact_value;
use crate::render::{columns_table, page_footer, toggles_line, view_table};

/// Load the configuration first so record cells can be coerced by column type.
pub fn load_source(source: &SourceArgs) -> Result<(TableConfig, Vec<Record>)> {
    let config = load_table_config(&source.config)
        .with_context(|| format!("load table configuration {}", source.config.display()))?;
    let records = load_records(&source.records, &config)
        .with_context(|| format!("load records {}", source.records.display()))?;
    Ok((config, records))
}

/// Translate the view flags into query state.
pub fn query_state(view: &ViewArgs) -> QueryState {
    let mut state = QueryState::new();
    if let Some(term) = &view.search {
        state = state.with_search(term.clone());
    }
    for filter in &view.filters {
        state.set_filter(filter.key.clone(), filter.value.clone());
    }
    if let Some(key) = &view.sort {
        let direction = if view.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        state = state.with_sort(SortSpec::new(key.clone(), direction));
    }
    debug!(
        search = redact_value(&state.search_term),
        filters = state.filters.len(),
        sort = state.sort.as_ref().map(|spec| spec.column.as_str()),
        "query state from flags"
    );
    state
}

pub fn run_query(args: &QueryArgs, out: &mut impl Write) -> Result<()> {
    let span = info_span!("query", records = %args.source.records.display());
    let _guard = span.enter();

    let (config, records) = load_source(&args.source)?;
    let engine = QueryEngine::new(config).with_state(query_state(&args.view));
    let view = engine.apply(&records);
    info!(total = records.len(), matching = view.len(), "query complete");

    let page = paginate(&view, args.page, args.page_size);
    writeln!(out, "{}", view_table(engine.config(), &page))?;
    writeln!(out, "{}", page_footer(&page, args.page_size))?;
    Ok(())
}

pub fn run_export(args: &ExportArgs, out: &mut impl Write) -> Result<()> {
    let span = info_span!("export", records = %args.source.records.display());
    let _guard = span.enter();

    let (config, records) = load_source(&args.source)?;
    let options = ExportOptions::new()
        .with_delimiter(args.delimiter)
        .with_quoting(if args.quote {
            Quoting::Rfc4180
        } else {
            Quoting::None
        })
        .with_locale(args.locale);
    let text = if args.all {
        export_all(&records, &config, &options)
    } else {
        export_view(&records, &config, &query_state(&args.view), &options)
    }
    .context("export table")?;

    match &args.output {
        Some(target) => {
            let path = if target.is_dir() {
                let stem = args
                    .source
                    .records
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("export");
                target.join(export_file_name(stem, Local::now().date_naive()))
            } else {
                target.clone()
            };
            fs::write(&path, &text).with_context(|| format!("write {}", path.display()))?;
            info!(
                path = %path.display(),
                bytes = text.len(),
                mime = EXPORT_MIME_TYPE,
                "export written"
            );
        }
        None => writeln!(out, "{text}")?,
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs, out: &mut impl Write) -> Result<()> {
    let config = load_table_config(&args.config)
        .with_context(|| format!("load table configuration {}", args.config.display()))?;
    writeln!(out, "{}", columns_table(&config))?;
    writeln!(out, "{}", toggles_line(&config))?;
    Ok(())
}
