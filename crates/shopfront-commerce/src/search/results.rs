//! Query results and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed, already clamped).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info, clamping `page` into `[1, total_pages]`.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Index range of this page within the full result list.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset().min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    /// All page numbers, for the page selector.
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    /// Whether page controls are worth showing (more than one page of results).
    pub fn shows_controls(&self) -> bool {
        self.total > self.per_page
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 when there are no results.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

/// The visible page of a catalog query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome<'a> {
    /// Products on the current page, in catalog order.
    pub items: Vec<&'a Product>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<'a> QueryOutcome<'a> {
    /// Number of products matching the filters (across all pages).
    pub fn result_count(&self) -> usize {
        self.pagination.total
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// The clamped current page.
    pub fn page(&self) -> usize {
        self.pagination.page
    }

    /// Whether nothing matched ("no products found").
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.range(), 10..20);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert!(p.is_last());
        assert_eq!(p.range(), 40..45);
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_pagination_empty_has_one_page() {
        let p = Pagination::new(3, 12, 0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.range(), 0..0);
        assert_eq!(p.start_item(), 0);
        assert!(!p.shows_controls());
    }

    #[test]
    fn test_pagination_clamps_page() {
        assert_eq!(Pagination::new(9, 12, 30).page, 3);
        assert_eq!(Pagination::new(0, 12, 30).page, 1);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(2, 12, 30);
        assert_eq!(p.start_item(), 13);
        assert_eq!(p.end_item(), 24);
        assert_eq!(p.page_numbers(), vec![1, 2, 3]);
        assert!(p.shows_controls());
    }

    #[test]
    fn test_exact_multiple() {
        let p = Pagination::new(1, 12, 24);
        assert_eq!(p.total_pages, 2);
    }
}
