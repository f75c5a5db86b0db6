// src/query/paginate.rs
use std::ops::Range;

/// `ceil(count / page_size)`; zero items → zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// 1-based page anchoring over a result of `len` items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    len: usize,
    current: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), len: 0, current: 1 }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.len, self.page_size)
    }

    /// New result after a filter change: back to page 1.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.current = 1;
    }

    /// New result after a data refresh: stay put unless the page vanished.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.current = self.current.clamp(1, self.total_pages().max(1));
    }

    /// Move to `page`; outside `1..=total_pages` nothing changes.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.current > 1 && self.go_to(self.current - 1)
    }

    /// Item positions shown on the current page.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.len);
        let end = (start + self.page_size).min(self.len);
        start..end
    }
}
