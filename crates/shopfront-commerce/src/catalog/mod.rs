//! Product catalog module.
//!
//! Contains product records, category facets, the product source boundary,
//! and the session catalog that loads from it.

mod facets;
mod loader;
mod product;
mod source;

pub use facets::{category_facets, CategoryFilter, ALL_CATEGORIES};
pub use loader::{Catalog, LoadState};
pub use product::Product;
pub use source::{ProductSource, ProductSourceError, RestProductSource, StaticProductSource};
