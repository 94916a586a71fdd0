//! Cart aggregation store: the cart plus its durable snapshot.

use shopfront_cache::{Cache, KeyValueStore};

use crate::cart::{Cart, LineItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Default storage key of the cart snapshot.
pub const DEFAULT_CART_KEY: &str = "cartItems";

/// Owns the session cart and is the only writer of its snapshot.
///
/// Every mutating operation persists the full cart afterwards. Storage
/// failures never reach the caller: a failed restore starts an empty cart,
/// a failed write is logged and the in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore the cart stored under [`DEFAULT_CART_KEY`].
    pub fn restore(store: S) -> Self {
        Self::restore_with_key(store, DEFAULT_CART_KEY)
    }

    /// Restore the cart stored under `key`, or start empty if the snapshot is
    /// absent, unreadable, or corrupt.
    pub fn restore_with_key(store: S, key: impl Into<String>) -> Self {
        let cache = Cache::new(store);
        let key = key.into();
        let cart = match cache.get::<Vec<LineItem>>(&key) {
            Ok(Some(lines)) => {
                let cart = Cart::from_lines(lines);
                tracing::debug!(%key, lines = cart.len(), "cart restored");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to load cart, starting empty");
                Cart::new()
            }
        };
        Self { cart, cache, key }
    }

    /// Add one unit of `product`. Returns the line's new quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> u32 {
        let quantity = self.cart.add(product);
        tracing::debug!(id = %product.id, quantity, "added to cart");
        self.sync();
        quantity
    }

    /// Add one unit to an existing line; no-op if absent.
    pub fn increase_quantity(&mut self, id: &ProductId) -> Option<u32> {
        let quantity = self.cart.increase(id);
        self.sync();
        quantity
    }

    /// Remove one unit, removing the line when it reaches zero.
    ///
    /// Returns the remaining quantity, `None` once the line is gone. No-op if
    /// the line is absent.
    pub fn decrease_or_remove(&mut self, id: &ProductId) -> Option<u32> {
        let quantity = self.cart.decrease_or_remove(id);
        if quantity.is_none() {
            tracing::debug!(%id, "line removed");
        }
        self.sync();
        quantity
    }

    /// Same as [`CartStore::decrease_or_remove`].
    pub fn decrease_quantity(&mut self, id: &ProductId) -> Option<u32> {
        self.decrease_or_remove(id)
    }

    /// Remove a line. Returns `false` (and changes nothing) if it was absent.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove(id);
        self.sync();
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.sync();
    }

    /// Total price, recomputed on every call.
    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage key of the snapshot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the storage backend.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Write the full cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Cache`] if serialization or the write fails.
    pub fn persist(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &self.cart.to_lines())?;
        Ok(())
    }

    fn sync(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_cache::{CacheError, MemoryStore};

    /// Backend whose reads and writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::StoreError("disk gone".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk gone".into()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    fn mug() -> Product {
        Product::new("1", "Red Mug", "Kitchen", Money::new(1000))
    }

    #[test]
    fn test_add_twice_then_decrease_twice() {
        let mut store = CartStore::restore(MemoryStore::new());
        store.add_to_cart(&mug());
        store.add_to_cart(&mug());
        assert_eq!(store.cart().get(&mug().id).unwrap().quantity, 2);
        assert_eq!(store.total_price(), Money::new(2000));

        assert_eq!(store.decrease_quantity(&mug().id), Some(1));
        assert_eq!(store.total_price(), Money::new(1000));

        assert_eq!(store.decrease_quantity(&mug().id), None);
        assert!(store.cart().is_empty());
        assert_eq!(store.total_price(), Money::zero());
    }

    #[test]
    fn test_every_mutation_persists() {
        let backend = MemoryStore::new();
        let mut store = CartStore::restore(backend.clone());

        store.add_to_cart(&mug());
        let snapshot = backend.get(DEFAULT_CART_KEY).unwrap().unwrap();
        assert!(snapshot.contains("\"quantity\":1"));

        store.clear();
        assert_eq!(backend.get(DEFAULT_CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_restore_roundtrip() {
        let backend = MemoryStore::new();
        let mut store = CartStore::restore(backend.clone());
        store.add_to_cart(&mug());
        store.add_to_cart(&mug());
        store.add_to_cart(&Product::new("3", "Notebook", "Office", Money::new(500)));

        let restored = CartStore::restore(backend);
        assert_eq!(restored.cart(), store.cart());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let backend = MemoryStore::new();
        backend.set(DEFAULT_CART_KEY, "not json at all").unwrap();

        let store = CartStore::restore(backend);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_storage_failures_are_absorbed() {
        let mut store = CartStore::restore(BrokenStore);
        assert!(store.cart().is_empty());

        assert_eq!(store.add_to_cart(&mug()), 1);
        assert_eq!(store.total_price(), Money::new(1000));
        assert!(store.persist().is_err());
    }

    #[test]
    fn test_custom_key() {
        let backend = MemoryStore::new();
        let mut store = CartStore::restore_with_key(backend.clone(), "cart:sess_1");
        store.add_to_cart(&mug());

        assert_eq!(store.key(), "cart:sess_1");
        assert!(backend.exists("cart:sess_1").unwrap());
        assert!(!backend.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_remove_absent_leaves_cart_unchanged() {
        let mut store = CartStore::restore(MemoryStore::new());
        store.add_to_cart(&mug());
        let before = store.cart().clone();

        assert!(!store.remove_from_cart(&ProductId::new("404")));
        assert_eq!(store.cart(), &before);
    }
}
