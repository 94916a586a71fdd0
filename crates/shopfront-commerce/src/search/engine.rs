//! The catalog query engine.
//!
//! A pure function of (products, category, committed term, page). Results
//! are re-derived on every call; at catalog sizes of a few hundred items a
//! linear scan is all that is needed.

use crate::catalog::{CategoryFilter, Product};
use crate::search::{Pagination, QueryOutcome};

/// Products shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Products passing the category filter and the committed search term, in
/// catalog order.
///
/// The term matches case-insensitively as a substring of the name or the
/// description. An empty term matches everything.
pub fn filter_products<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    term: &str,
) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| category.matches(p))
        .filter(|p| needle.is_empty() || p.matches_term(&needle))
        .collect()
}

/// Filter, then cut out the requested page.
///
/// `page` is clamped into `[1, total_pages]`; the clamped value is reported
/// in the outcome's pagination.
pub fn run_query<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    term: &str,
    page: usize,
    per_page: usize,
) -> QueryOutcome<'a> {
    let filtered = filter_products(products, category, term);
    let pagination = Pagination::new(page, per_page, filtered.len());
    let items = filtered
        .get(pagination.range())
        .map(|page| page.to_vec())
        .unwrap_or_default();

    QueryOutcome { items, pagination }
}
