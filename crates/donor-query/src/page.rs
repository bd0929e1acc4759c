//! Paging over a query view.

/// One page of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'v, T> {
    /// 1-based page number that was requested.
    pub number: usize,
    pub rows: &'v [T],
    pub total_rows: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `view` into the requested page.
///
/// Page numbers start at 1; page 0 is treated as 1. A `page_size` of 0 puts
/// everything on a single page. Pages past the end are empty.
pub fn paginate<T>(view: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let number = page.max(1);
    let total_rows = view.len();
    if page_size == 0 {
        return Page {
            number,
            rows: if number == 1 { view } else { &view[..0] },
            total_rows,
            total_pages: 1,
        };
    }
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let start = (number - 1).saturating_mul(page_size).min(total_rows);
    let end = start.saturating_add(page_size).min(total_rows);
    Page {
        number,
        rows: &view[start..end],
        total_rows,
        total_pages,
    }
}
