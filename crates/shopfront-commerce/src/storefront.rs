//! Storefront session: every piece of shopper-facing state in one place.

use shopfront_cache::KeyValueStore;

use crate::cart::{Cart, CartStore};
use crate::catalog::{Catalog, CategoryFilter, Product, ProductSource};
use crate::config::StorefrontConfig;
use crate::ids::ProductId;
use crate::money::Money;
use crate::notify::{CartView, CheckoutAcknowledgement, Toast, ToastState};
use crate::search::{CatalogQuery, QueryOutcome};

/// One shopper session.
///
/// Owns the persisted cart, the catalog, the browse query, and the two
/// transient notifications. Nothing here is shared between sessions.
#[derive(Debug)]
pub struct Storefront<S> {
    cart: CartStore<S>,
    catalog: Catalog,
    query: CatalogQuery,
    toast: Toast,
    acknowledgement: CheckoutAcknowledgement,
    fetch_limit: usize,
    toast_name_max_chars: usize,
}

impl<S: KeyValueStore> Storefront<S> {
    /// A session with default settings, restoring the cart from `store`.
    pub fn new(store: S) -> Self {
        Self::from_config(store, &StorefrontConfig::default())
    }

    /// A session configured by `config`, restoring the cart from `store`.
    pub fn from_config(store: S, config: &StorefrontConfig) -> Self {
        Self {
            cart: CartStore::restore_with_key(store, config.cart.storage_key.clone()),
            catalog: Catalog::new(),
            query: CatalogQuery::with_page_size(config.catalog.effective_page_size()),
            toast: Toast::new(config.notify.toast_delay()),
            acknowledgement: CheckoutAcknowledgement::new(),
            fetch_limit: config.catalog.fetch_limit,
            toast_name_max_chars: config.notify.toast_name_max_chars,
        }
    }

    /// Replace the catalog with an already-loaded product list.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.catalog = Catalog::with_products(products);
        self
    }

    // -- catalog --

    /// Run the session's single catalog fetch. Returns `false` if it already
    /// ran.
    pub async fn load_catalog(&mut self, source: &dyn ProductSource) -> bool {
        self.catalog.load(source, self.fetch_limit).await
    }

    /// The session catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the catalog fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    /// Category facet labels, `"All"` first.
    pub fn facets(&self) -> Vec<String> {
        self.catalog.facets()
    }

    // -- browse query --

    /// The current browse query.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Mutable access to the browse query.
    pub fn query_mut(&mut self) -> &mut CatalogQuery {
        &mut self.query
    }

    /// Follow the search box.
    pub fn set_search_draft(&mut self, text: impl Into<String>) {
        self.query.set_draft(text);
    }

    /// Apply the drafted search.
    pub fn commit_search(&mut self) {
        self.query.commit_search();
    }

    /// Pick a category facet.
    pub fn select_category(&mut self, category: impl Into<CategoryFilter>) {
        self.query.select_category(category);
    }

    /// Reset search and category.
    pub fn clear_all_filters(&mut self) {
        self.query.clear_all_filters();
    }

    /// Advance one page, stopping at the last page of the current results.
    pub fn next_page(&mut self) {
        let total_pages = self.query.run(self.catalog.products()).total_pages();
        self.query.next_page(total_pages);
    }

    /// Go back one page, stopping at page 1.
    pub fn prev_page(&mut self) {
        self.query.prev_page();
    }

    /// Jump to `page`; out-of-range pages are clamped when evaluated.
    pub fn go_to_page(&mut self, page: usize) {
        self.query.go_to_page(page);
    }

    /// Products on the current page.
    ///
    /// The stored page is clamped to the result set, so a page that became
    /// out of range after a filter change snaps back to the last page.
    pub fn visible_page(&mut self) -> QueryOutcome<'_> {
        self.query.evaluate(self.catalog.products())
    }

    // -- cart --

    /// Add one unit of `product` and announce it with the toast. Returns the
    /// line's new quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> u32 {
        let quantity = self.cart.add_to_cart(product);
        self.toast.show(product.name.clone());
        quantity
    }

    /// Add one unit to an existing line.
    pub fn increase_quantity(&mut self, id: &ProductId) -> Option<u32> {
        self.cart.increase_quantity(id)
    }

    /// Remove one unit, dropping the line at zero.
    pub fn decrease_or_remove(&mut self, id: &ProductId) -> Option<u32> {
        self.cart.decrease_or_remove(id)
    }

    /// Drop a line.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.cart.remove_from_cart(id)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// The session cart.
    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// The cart together with its persistence.
    pub fn cart_store(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    // -- notifications --

    /// Show the order-placed acknowledgement.
    pub fn checkout(&mut self) {
        self.acknowledgement.trigger();
    }

    /// Close the acknowledgement, emptying the cart. Returns `false` if it
    /// was not showing.
    pub fn dismiss_acknowledgement(&mut self) -> bool {
        self.acknowledgement.dismiss(&mut self.cart)
    }

    /// Which cart page to render.
    pub fn cart_view(&self) -> CartView {
        self.acknowledgement.cart_view(self.cart.cart())
    }

    /// The add-to-cart toast.
    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    /// Hide the toast now.
    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    /// Current toast state.
    pub fn toast_state(&self) -> ToastState {
        self.toast.state()
    }

    /// Toast text with long product names truncated.
    pub fn toast_label(&self) -> Option<String> {
        self.toast.state().label(self.toast_name_max_chars)
    }
}
