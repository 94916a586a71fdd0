//! Session catalog: the product list plus its loading state.

use crate::catalog::{category_facets, Product, ProductSource, ProductSourceError};

/// Where the one-per-session fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch issued yet.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading,
    /// Fetch finished (successfully or not).
    Done,
}

/// The full product list for the session.
///
/// Products are fetched at most once. A failed fetch leaves an empty list
/// and clears the loading flag; it is never retried.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    state: LoadState,
}

impl Catalog {
    /// An empty, not-yet-loaded catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog that is already loaded with `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            state: LoadState::Done,
        }
    }

    /// Fetch products from `source`, at most `limit` of them.
    ///
    /// Returns `false` without touching the source if a fetch was already
    /// issued this session. If the returned future is dropped before the
    /// fetch completes, the catalog ends up empty and not loading.
    pub async fn load(&mut self, source: &dyn ProductSource, limit: usize) -> bool {
        if !self.begin_load() {
            return false;
        }
        let mut guard = LoadGuard { catalog: self };
        let result = source.fetch_products(limit).await;
        guard.catalog.finish_load(result);
        true
    }

    /// Mark the fetch as in flight. Returns `false` if one was already issued.
    pub fn begin_load(&mut self) -> bool {
        if self.state != LoadState::Idle {
            tracing::debug!(state = ?self.state, "catalog fetch already issued");
            return false;
        }
        self.state = LoadState::Loading;
        true
    }

    /// Record the fetch outcome. Failures are logged and yield an empty list.
    pub fn finish_load(&mut self, result: Result<Vec<Product>, ProductSourceError>) {
        match result {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalog loaded");
                self.products = products;
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog fetch failed");
                self.products = Vec::new();
            }
        }
        self.state = LoadState::Done;
    }

    /// Whether the fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// All products, in source order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Category facets of the current product list.
    pub fn facets(&self) -> Vec<String> {
        category_facets(&self.products)
    }
}

/// Settles a fetch that was cancelled while in flight.
struct LoadGuard<'a> {
    catalog: &'a mut Catalog,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.catalog.state == LoadState::Loading {
            tracing::warn!("catalog fetch cancelled");
            self.catalog.products = Vec::new();
            self.catalog.state = LoadState::Done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::catalog::StaticProductSource;
    use crate::money::Money;

    /// A source whose fetch never completes.
    struct StalledSource;

    #[async_trait]
    impl ProductSource for StalledSource {
        async fn fetch_products(&self, _limit: usize) -> Result<Vec<Product>, ProductSourceError> {
            std::future::pending().await
        }
    }

    fn products() -> Vec<Product> {
        vec![
            Product::new("1", "Red Mug", "Kitchen", Money::new(1000)),
            Product::new("2", "Notebook", "Office", Money::new(500)),
        ]
    }

    #[tokio::test]
    async fn test_load_success() {
        let mut catalog = Catalog::new();
        let source = StaticProductSource::new(products());

        assert!(catalog.load(&source, 500).await);
        assert_eq!(catalog.products().len(), 2);
        assert!(!catalog.is_loading());
        assert_eq!(catalog.facets(), vec!["All", "Kitchen", "Office"]);
    }

    #[tokio::test]
    async fn test_load_failure_yields_empty() {
        let mut catalog = Catalog::new();
        let source = StaticProductSource::failing("connection refused");

        assert!(catalog.load(&source, 500).await);
        assert!(catalog.products().is_empty());
        assert!(!catalog.is_loading());
        assert_eq!(catalog.state(), LoadState::Done);
    }

    #[tokio::test]
    async fn test_only_one_fetch_per_session() {
        let mut catalog = Catalog::new();
        assert!(catalog.load(&StaticProductSource::new(products()), 500).await);

        let second = StaticProductSource::new(Vec::new());
        assert!(!catalog.load(&second, 500).await);
        assert_eq!(catalog.products().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_settles_empty() {
        let mut catalog = Catalog::new();

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            catalog.load(&StalledSource, 500),
        )
        .await;
        assert!(outcome.is_err());

        assert!(!catalog.is_loading());
        assert_eq!(catalog.state(), LoadState::Done);
        assert!(catalog.products().is_empty());
        assert!(!catalog.load(&StaticProductSource::new(products()), 500).await);
    }

    #[test]
    fn test_loading_flag_between_phases() {
        let mut catalog = Catalog::new();
        assert!(catalog.begin_load());
        assert!(catalog.is_loading());
        assert!(!catalog.begin_load());

        catalog.finish_load(Ok(products()));
        assert!(!catalog.is_loading());
    }
}
