// src/view.rs
//
// DirectoryView: the stateful side of the query engine, for interactive frontends.
//
// - Owns the filter state, the search debouncer and the paginator.
// - Holds the result as row indices into the current snapshot (no record copies).
// - Recomputes only when an applied input changes or a newer snapshot shows up.
// - A filter change sends the reader back to page 1; a data refresh does not.

use std::sync::Arc;
use std::time::Instant;

use crate::config::options::QueryOptions;
use crate::query::{Debouncer, Facets, Filters, Paginator, SortOrder, select};
use crate::record::PropertyRecord;
use crate::store::{Snapshot, SnapshotStore, Status};

/// What the main area should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// First load still running.
    Loading,
    /// Last refresh failed; the message replaces the grid.
    Error(String),
    /// Loaded, but nothing matches (or the sheet is empty).
    Empty,
    Results,
}

pub struct DirectoryView {
    options: QueryOptions,
    snapshot: Arc<Snapshot>,
    facets: Facets,

    /// What the user typed, applied or not.
    raw_search: String,
    debounce: Debouncer<String>,
    filters: Filters,

    /// Positions into `snapshot.records()`, in display order.
    row_ix: Vec<usize>,
    pager: Paginator,
    recomputes: u64,
}

impl DirectoryView {
    pub fn new(options: QueryOptions) -> Self {
        let filters = Filters {
            min_rooms: options.min_rooms,
            max_rooms: options.max_rooms,
            ..Filters::default()
        };
        Self {
            debounce: Debouncer::new(options.debounce),
            pager: Paginator::new(options.page_size),
            options,
            snapshot: Arc::new(Snapshot::empty()),
            facets: Facets::default(),
            raw_search: s!(),
            filters,
            row_ix: Vec::new(),
            recomputes: 0,
        }
    }

    /* ---------------- Data ---------------- */

    /// Adopt a different snapshot. Returns false if it is the one already shown.
    pub fn set_snapshot(&mut self, snapshot: Arc<Snapshot>) -> bool {
        if Arc::ptr_eq(&self.snapshot, &snapshot) {
            return false;
        }
        self.snapshot = snapshot;
        self.facets = Facets::from_records(self.snapshot.records());
        self.recompute(false);
        true
    }

    /// Pull the store's snapshot if its generation moved.
    pub fn sync(&mut self, store: &SnapshotStore) -> bool {
        if store.generation() == self.snapshot.generation() {
            return false;
        }
        self.set_snapshot(store.snapshot())
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    /* ---------------- Search ---------------- */

    /// Text typed into the search box. Applied after the debounce delay via `tick`.
    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text == self.raw_search {
            return;
        }
        self.raw_search = text.clone();
        self.debounce.push(text, now);
    }

    /// Advance the debounce clock. Returns true if the result was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debounce.poll(now) {
            Some(text) if text != self.filters.search => {
                self.filters.search = text;
                self.recompute(true);
                true
            }
            _ => false,
        }
    }

    /// When the next `tick` could change something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn raw_search(&self) -> &str {
        &self.raw_search
    }

    /* ---------------- Filters ---------------- */

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_city(&mut self, city: Option<String>) {
        if self.filters.city != city {
            self.filters.city = city;
            self.recompute(true);
        }
    }

    pub fn set_location(&mut self, location: Option<String>) {
        if self.filters.location != location {
            self.filters.location = location;
            self.recompute(true);
        }
    }

    /// Inclusive rooms range. Bounds given in either order.
    pub fn set_room_range(&mut self, min: u32, max: u32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        if (self.filters.min_rooms, self.filters.max_rooms) != (min, max) {
            self.filters.min_rooms = min;
            self.filters.max_rooms = max;
            self.recompute(true);
        }
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if self.filters.sort != sort {
            self.filters.sort = sort;
            self.recompute(true);
        }
    }

    pub fn toggle_sort(&mut self) {
        self.set_sort(self.filters.sort.toggled());
    }

    /// Apply a whole filter set at once, search included, skipping the debounce.
    /// For non-interactive callers that already know what they want.
    pub fn apply(&mut self, filters: Filters) {
        self.debounce.cancel();
        self.raw_search = filters.search.clone();
        if self.filters != filters {
            self.filters = filters;
            self.recompute(true);
        }
    }

    /// Back to defaults: empty search, any city/location, full range, ascending.
    pub fn clear(&mut self) {
        let defaults = Filters {
            min_rooms: self.options.min_rooms,
            max_rooms: self.options.max_rooms,
            ..Filters::default()
        };
        self.apply(defaults);
    }

    /* ---------------- Results ---------------- */

    fn recompute(&mut self, filters_changed: bool) {
        self.row_ix = select(self.snapshot.records(), &self.filters);
        if filters_changed {
            self.pager.reset(self.row_ix.len());
        } else {
            self.pager.resize(self.row_ix.len());
        }
        self.recomputes += 1;
    }

    /// How many times the result has been rebuilt.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn len(&self) -> usize {
        self.row_ix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ix.is_empty()
    }

    pub fn row_ix(&self) -> &[usize] {
        &self.row_ix
    }

    /// Every matching record, in display order.
    pub fn results(&self) -> impl Iterator<Item = &PropertyRecord> + '_ {
        let records = self.snapshot.records();
        self.row_ix.iter().map(move |&i| &records[i])
    }

    /// The slice of results on the current page.
    pub fn page(&self) -> Vec<&PropertyRecord> {
        let records = self.snapshot.records();
        self.row_ix[self.pager.range()].iter().map(|&i| &records[i]).collect()
    }

    /* ---------------- Paging ---------------- */

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pager.go_to(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    /* ---------------- State ---------------- */

    /// An error replaces the grid even when older data is still held.
    pub fn state(&self, status: &Status) -> ViewState {
        match status {
            Status::Uninitialized => ViewState::Loading,
            Status::Error(msg) => ViewState::Error(msg.clone()),
            Status::Ready if self.is_empty() => ViewState::Empty,
            Status::Ready => ViewState::Results,
        }
    }
}
