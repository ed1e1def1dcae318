//! FILENAME: app/src/grid.rs
//! PURPOSE: Grid state management for the roster list views.
//! CONTEXT: Owns everything the table remembers between renders: quick
//! filter, search text, tri-state sort, page index and size, column
//! visibility, and the row selection. The records themselves come from the
//! realtime data source on every call to `view`; the controller never
//! stores them. Selection is keyed by record id, never by row position, so
//! it survives refilter and resort.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;

use engine::{FieldDescriptor, FieldKind, Record, StaffCategory};
use persistence::{
    load_grid_preferences, save_grid_preferences, GridPreferences, PreferenceStore,
};
use roster_engine::{
    compute_selection_stats, compute_stats, filter_records, page_count, paginate, sort_records,
    QuickFilter, SelectionStats, SortDirection, SortSpec, TableStats, PAGE_SIZES,
};

use crate::keyboard::{grid_action, GridAction, KeyInput};

// ============================================================================
// TABLE VIEW
// ============================================================================

/// Everything the shell needs to render one state of the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Rows of the current page, filtered and sorted.
    pub rows: Vec<Record>,
    pub page_index: usize,
    pub page_count: usize,
    /// Size of the filtered set, across all pages.
    pub total_rows: usize,
    /// Footer statistics over the filtered set.
    pub stats: TableStats,
    /// Toolbar statistics over the selected rows still present in the
    /// filtered set; `None` when nothing is selected.
    pub selection_stats: Option<SelectionStats>,
    pub selected_count: usize,
}

// ============================================================================
// GRID CONTROLLER
// ============================================================================

/// State manager for one rendered table.
pub struct GridController<P: PreferenceStore> {
    category: StaffCategory,
    prefs_store: P,
    prefs: GridPreferences,
    quick_filter: QuickFilter,
    search: String,
    sort: Option<SortSpec>,
    page_index: usize,
    selection: HashSet<String>,
    /// Filtered-set size from the last `view` call, used to clamp the page
    /// index when the page size changes.
    last_total_rows: usize,
}

impl<P: PreferenceStore> GridController<P> {
    /// Creates a controller for a category, loading persisted preferences.
    pub fn new(category: StaffCategory, prefs_store: P) -> Self {
        let prefs = load_grid_preferences(&prefs_store, category);
        GridController {
            category,
            prefs_store,
            prefs,
            quick_filter: QuickFilter::default(),
            search: String::new(),
            sort: None,
            page_index: 0,
            selection: HashSet::new(),
            last_total_rows: 0,
        }
    }

    pub fn category(&self) -> StaffCategory {
        self.category
    }

    pub fn quick_filter(&self) -> QuickFilter {
        self.quick_filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.prefs.page_size
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    /// Selected ids in unspecified order, for bulk operations.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.iter().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    pub fn set_quick_filter(&mut self, filter: QuickFilter) {
        if self.quick_filter != filter {
            self.quick_filter = filter;
            self.page_index = 0;
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.search != query {
            self.search = query;
            self.page_index = 0;
        }
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Cycles the sort on a column: ascending, then descending, then none.
    /// Toggling a different column restarts at ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => Some(SortSpec {
                    key: spec.key,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Sets and persists the page size. Rejects sizes outside the fixed
    /// set. The page index resets when it would fall past the new page
    /// count.
    pub fn set_page_size(&mut self, size: u32) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.prefs.page_size = size;
        self.persist_prefs();
        if self.page_index >= page_count(self.last_total_rows, size as usize) {
            self.page_index = 0;
        }
        true
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.page_index = index;
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    /// Flips a column's visibility and persists the map.
    pub fn toggle_column(&mut self, key: &str) {
        let visible = self.prefs.is_visible(key);
        self.prefs
            .column_visibility
            .insert(key.to_string(), !visible);
        self.persist_prefs();
    }

    pub fn is_column_visible(&self, key: &str) -> bool {
        self.prefs.is_visible(key)
    }

    /// The category's descriptors with hidden columns removed.
    pub fn visible_fields(&self) -> Vec<&'static FieldDescriptor> {
        self.category
            .fields()
            .iter()
            .filter(|f| self.prefs.is_visible(f.key))
            .collect()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn toggle_row_selected(&mut self, id: &str) {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Selects or deselects every row on the given page. Only the page is
    /// affected; rows on other pages keep their state.
    pub fn set_all_on_page(&mut self, page_rows: &[Record], selected: bool) {
        for record in page_rows {
            let id = record.id();
            if id.is_empty() {
                continue;
            }
            if selected {
                self.selection.insert(id);
            } else {
                self.selection.remove(&id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Routes a key press. Selection and search actions are applied
    /// directly; a bulk-delete request is returned to the shell, which owns
    /// the confirmation dialog.
    pub fn apply_key(&mut self, input: &KeyInput, page_rows: &[Record]) -> Option<GridAction> {
        let action = grid_action(input, !self.selection.is_empty(), !self.search.is_empty())?;
        match action {
            GridAction::SelectPage => self.set_all_on_page(page_rows, true),
            GridAction::ClearSelection => self.clear_selection(),
            GridAction::ClearSearch => self.set_search(""),
            GridAction::RequestBulkDelete => {}
        }
        Some(action)
    }

    // ------------------------------------------------------------------
    // View assembly
    // ------------------------------------------------------------------

    /// Runs the full pipeline over the latest record snapshot:
    /// filter, sort, paginate, aggregate. Clamps the page index against the
    /// new result size.
    pub fn view(&mut self, records: &[Record], now: NaiveDateTime) -> TableView {
        let mut visible = filter_records(records, self.quick_filter, &self.search, now);
        if let Some(spec) = &self.sort {
            let kind = self
                .category
                .descriptor(&spec.key)
                .map(|f| f.kind)
                .unwrap_or(FieldKind::Text);
            sort_records(&mut visible, spec, kind);
        }

        let stats = compute_stats(&visible, now);
        let selected: Vec<Record> = visible
            .iter()
            .filter(|r| self.selection.contains(&r.id()))
            .cloned()
            .collect();
        let selection_stats = compute_selection_stats(&selected);

        let page = paginate(&visible, self.page_index, self.prefs.page_size as usize);
        self.page_index = page.page_index;
        self.last_total_rows = page.total_rows;

        TableView {
            rows: page.rows,
            page_index: page.page_index,
            page_count: page.page_count,
            total_rows: page.total_rows,
            stats,
            selection_stats,
            selected_count: self.selection.len(),
        }
    }

    fn persist_prefs(&mut self) {
        if let Err(err) = save_grid_preferences(&mut self.prefs_store, self.category, &self.prefs)
        {
            log::warn!(
                "failed to persist {} grid preferences: {}",
                self.category.as_str(),
                err
            );
        }
    }
}
