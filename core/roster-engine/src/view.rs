//! FILENAME: core/roster-engine/src/view.rs
//! PURPOSE: Pagination - slices a filtered, sorted record list into the page
//! the grid renders.
//! CONTEXT: The page index is clamped rather than rejected: shrinking the
//! result set (or growing the page size) pulls the user back to the last
//! valid page instead of showing an empty one.

use engine::Record;
use serde::Serialize;

/// The selectable page sizes.
pub const PAGE_SIZES: [u32; 5] = [10, 20, 50, 100, 200];

/// Renderable output of the pagination stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Records on the current page, in display order.
    pub rows: Vec<Record>,
    /// Effective (clamped) page index.
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_rows: usize,
}

/// Number of pages for a result set. An empty set still has one (empty)
/// page so a page index of 0 is always valid.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    if total_rows == 0 {
        1
    } else {
        total_rows.div_ceil(size)
    }
}

/// Cuts one page out of the full result set.
pub fn paginate(records: &[Record], page_index: usize, page_size: usize) -> PageView {
    let size = page_size.max(1);
    let count = page_count(records.len(), size);
    let index = page_index.min(count - 1);
    let start = index * size;
    let end = (start + size).min(records.len());
    let rows = if start < records.len() {
        records[start..end].to_vec()
    } else {
        Vec::new()
    };
    PageView {
        rows,
        page_index: index,
        page_count: count,
        page_size: size,
        total_rows: records.len(),
    }
}
