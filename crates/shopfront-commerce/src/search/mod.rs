//! Search module.
//!
//! Contains the catalog query state, the pure query engine, and pagination.

mod engine;
mod query;
mod results;

pub use engine::{filter_products, run_query, DEFAULT_PAGE_SIZE};
pub use query::CatalogQuery;
pub use results::{Pagination, QueryOutcome};
