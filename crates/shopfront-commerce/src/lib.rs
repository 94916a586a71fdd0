//! Client-side state core for a single-session storefront.
//!
//! This crate holds everything a shopper's session tracks:
//!
//! - **Cart**: Line items aggregated by product, persisted after every change
//! - **Catalog**: The product list, fetched once per session, and its facets
//! - **Search**: Category filter, two-stage search text, pagination
//! - **Notify**: Add-to-cart toast and the checkout acknowledgement
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_cache::MemoryStore;
//! use shopfront_commerce::prelude::*;
//!
//! let mut shop = Storefront::new(MemoryStore::new());
//! shop.load_catalog(&RestProductSource::from_config(&config.catalog)?).await;
//!
//! shop.select_category("Shoes");
//! let page = shop.visible_page();
//! println!("{} results", page.result_count());
//!
//! let product = page.items[0].clone();
//! shop.add_to_cart(&product);
//! println!("Total: {}", shop.total_price());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod config;
pub mod logging;

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod search;
pub mod storefront;

pub use config::StorefrontConfig;
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{LogFormat, StorefrontConfig};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;
    pub use crate::storefront::Storefront;

    // Catalog
    pub use crate::catalog::{
        Catalog, CategoryFilter, LoadState, Product, ProductSource, ProductSourceError,
        RestProductSource, StaticProductSource,
    };

    // Cart
    pub use crate::cart::{Cart, CartStore, LineItem};

    // Search
    pub use crate::search::{CatalogQuery, Pagination, QueryOutcome};

    // Notify
    pub use crate::notify::{CartView, CheckoutAcknowledgement, Toast, ToastState};
}
