//! Report pagination
//!
//! Pages are 1-based. Asking for a page past the end yields an empty page
//! rather than an error, so a consumer holding a stale page count degrades
//! gracefully.

/// One page of a report
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// 1-based page number requested
    pub page: usize,
    /// Total number of pages (at least 1, even when empty)
    pub total_pages: usize,
    /// Total rows across all pages
    pub total_rows: usize,
}

/// Slice rows into one page
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = (total_rows.max(1) + page_size - 1) / page_size;

    let start = (page - 1).saturating_mul(page_size);
    let items = rows
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_rows,
    }
}
