// src/services/pagination.rs
use serde::Serialize;
use std::ops::Range;

use crate::services::formatting::group_thousands;

pub const PAGE_SIZE: usize = 20;

/// Fixed-size window over `total_items`. Pages are 1-based and navigation
/// never leaves `1..=total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_size: usize,
    pub current_page: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(total_items: usize) -> Self {
        Self::with_page_size(total_items, PAGE_SIZE)
    }

    pub fn with_page_size(total_items: usize, page_size: usize) -> Self {
        Pagination {
            page_size: page_size.max(1),
            current_page: 1,
            total_items,
        }
    }

    /// An empty list still has one (empty) page.
    pub fn total_pages(&self) -> usize {
        ((self.total_items + self.page_size - 1) / self.page_size).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next(&mut self) {
        self.go_to(self.current_page + 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.current_page.saturating_sub(1));
    }

    /// Index range of the rows on the current page.
    pub fn window(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.window();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    /// "Showing 41-45 of 45" (1-based, inclusive).
    pub fn showing_label(&self) -> String {
        let range = self.window();
        if range.is_empty() {
            format!("Showing 0 of {}", group_thousands(self.total_items as u64))
        } else {
            format!(
                "Showing {}-{} of {}",
                group_thousands((range.start + 1) as u64),
                group_thousands(range.end as u64),
                group_thousands(self.total_items as u64)
            )
        }
    }
}
