//! Catalog query state.

use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryFilter, Product};
use crate::search::{run_query, QueryOutcome, DEFAULT_PAGE_SIZE};

/// The user's current browse state over the catalog.
///
/// Search text has two stages: the draft follows the input box, the committed
/// term is what filtering actually uses. Committing a search or changing the
/// category sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    category: CategoryFilter,
    draft: String,
    committed: String,
    page: usize,
    per_page: usize,
}

impl CatalogQuery {
    /// A fresh query: all categories, no search, page 1.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// A fresh query with a custom page size (at least 1).
    pub fn with_page_size(per_page: usize) -> Self {
        Self {
            category: CategoryFilter::All,
            draft: String::new(),
            committed: String::new(),
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Replace the draft text. Filtering is unaffected until committed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Apply the draft as the search term and return to page 1.
    pub fn commit_search(&mut self) {
        self.committed = self.draft.clone();
        self.page = 1;
        tracing::debug!(term = %self.committed, "search committed");
    }

    /// Clear both draft and committed term and return to page 1.
    pub fn clear_search(&mut self) {
        self.draft.clear();
        self.committed.clear();
        self.page = 1;
    }

    /// Switch category and return to page 1. Search state is kept.
    pub fn select_category(&mut self, category: impl Into<CategoryFilter>) {
        self.category = category.into();
        self.page = 1;
        tracing::debug!(category = %self.category, "category selected");
    }

    /// Reset category to "All" and clear the search.
    pub fn clear_all_filters(&mut self) {
        self.clear_search();
        self.category = CategoryFilter::All;
    }

    /// Jump to `page`. Values below 1 become 1; the upper bound is applied
    /// when the query runs.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, stopping at `total_pages`.
    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages.max(1));
    }

    /// Go back one page, stopping at 1.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Run the query over `products`.
    pub fn run<'a>(&self, products: &'a [Product]) -> QueryOutcome<'a> {
        run_query(
            products,
            &self.category,
            &self.committed,
            self.page,
            self.per_page,
        )
    }

    /// Run the query and store the clamped page back.
    pub fn evaluate<'a>(&mut self, products: &'a [Product]) -> QueryOutcome<'a> {
        let outcome = self.run(products);
        self.page = outcome.page();
        outcome
    }

    /// Selected category.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether there is draft text (the clear button is shown).
    pub fn has_draft(&self) -> bool {
        !self.draft.is_empty()
    }

    /// Term currently applied to filtering.
    pub fn committed_term(&self) -> &str {
        &self.committed
    }

    /// Requested page (before clamping against results).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new()
    }
}
