//! Terminal tables for views and column listings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use donor_model::{ColumnType, Record, TableConfig};
use donor_query::Page;

/// Render one page of a view. Cells use each column's presentation
/// formatter; missing values show as a dim `-`.
pub fn view_table(config: &TableConfig, page: &Page<'_, &Record>) -> Table {
    let mut table = Table::new();
    table.set_header(config.labels().map(header_cell).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for (index, column) in config.columns.iter().enumerate() {
        if column.column_type == ColumnType::Number {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for record in page.rows {
        table.add_row(
            config
                .columns
                .iter()
                .map(|column| {
                    if record.get(&column.key).is_none() && column.format.is_none() {
                        dim_cell("-")
                    } else {
                        Cell::new(column.display(record))
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// The line printed under a view, e.g. `Rows 1-25 of 40 (page 1/2)`.
pub fn page_footer(page: &Page<'_, &Record>, page_size: usize) -> String {
    if page.is_empty() {
        return format!(
            "No rows on page {} ({} matching, {} page(s))",
            page.number, page.total_rows, page.total_pages
        );
    }
    let first = (page.number - 1) * page_size + 1;
    let last = first + page.rows.len() - 1;
    format!(
        "Rows {first}-{last} of {} (page {}/{})",
        page.total_rows, page.number, page.total_pages
    )
}

/// Render the column layout of a configuration.
pub fn columns_table(config: &TableConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Sortable"),
        header_cell("Filterable"),
        header_cell("Required"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    for index in 3..6 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    for column in &config.columns {
        let options = if column.options.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(column.options.join(", "))
        };
        table.add_row(vec![
            Cell::new(&column.key)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&column.label),
            Cell::new(column.column_type),
            flag_cell(column.sortable),
            flag_cell(column.filterable),
            flag_cell(column.required),
            options,
        ]);
    }
    table
}

/// One-line summary of the table-level toggles.
pub fn toggles_line(config: &TableConfig) -> String {
    let flag = |enabled: bool| if enabled { "on" } else { "off" };
    format!(
        "searchable: {}  sortable: {}  filterable: {}  exportable: {}",
        flag(config.searchable),
        flag(config.sortable),
        flag(config.filterable),
        flag(config.exportable)
    )
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
