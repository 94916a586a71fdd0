//! Checkout acknowledgement ("order placed").
//!
//! This is a UI acknowledgement only. No order is recorded anywhere; closing
//! it empties the cart.

use shopfront_cache::KeyValueStore;

use crate::cart::{Cart, CartStore};

/// Acknowledgement visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcknowledgementState {
    #[default]
    Hidden,
    Visible,
}

/// What the cart page should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartView {
    /// "Your cart is empty".
    Empty,
    /// The line list with totals.
    Lines,
    /// The acknowledgement on top of the cart (possibly empty) underneath.
    Acknowledged,
}

/// Checkout acknowledgement controller.
#[derive(Debug, Clone, Default)]
pub struct CheckoutAcknowledgement {
    state: AcknowledgementState,
}

impl CheckoutAcknowledgement {
    /// A hidden acknowledgement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the acknowledgement. Cart contents are not checked.
    pub fn trigger(&mut self) {
        self.state = AcknowledgementState::Visible;
        tracing::info!("checkout acknowledged");
    }

    /// Close the acknowledgement and empty the cart.
    ///
    /// Returns `false` (and leaves the cart alone) if nothing was showing.
    pub fn dismiss<S: KeyValueStore>(&mut self, cart: &mut CartStore<S>) -> bool {
        if self.state == AcknowledgementState::Hidden {
            return false;
        }
        cart.clear();
        self.state = AcknowledgementState::Hidden;
        true
    }

    /// Whether the acknowledgement is showing.
    pub fn is_visible(&self) -> bool {
        self.state == AcknowledgementState::Visible
    }

    /// Current state.
    pub fn state(&self) -> AcknowledgementState {
        self.state
    }

    /// Pick the cart page view. A showing acknowledgement wins over the
    /// empty-cart view.
    pub fn cart_view(&self, cart: &Cart) -> CartView {
        if self.is_visible() {
            CartView::Acknowledged
        } else if cart.is_empty() {
            CartView::Empty
        } else {
            CartView::Lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;
    use shopfront_cache::MemoryStore;

    #[test]
    fn test_trigger_then_dismiss_clears_cart() {
        let mut cart = CartStore::restore(MemoryStore::new());
        cart.add_to_cart(&Product::new("1", "Mug", "Kitchen", Money::new(1000)));
        let mut ack = CheckoutAcknowledgement::new();

        ack.trigger();
        assert_eq!(ack.cart_view(cart.cart()), CartView::Acknowledged);

        assert!(ack.dismiss(&mut cart));
        assert!(cart.cart().is_empty());
        assert_eq!(ack.state(), AcknowledgementState::Hidden);
        assert_eq!(ack.cart_view(cart.cart()), CartView::Empty);
    }

    #[test]
    fn test_trigger_on_empty_cart_still_shows() {
        let cart = Cart::new();
        let mut ack = CheckoutAcknowledgement::new();
        assert_eq!(ack.cart_view(&cart), CartView::Empty);

        ack.trigger();
        assert_eq!(ack.cart_view(&cart), CartView::Acknowledged);
    }

    #[test]
    fn test_dismiss_when_hidden_keeps_cart() {
        let mut cart = CartStore::restore(MemoryStore::new());
        cart.add_to_cart(&Product::new("1", "Mug", "Kitchen", Money::new(1000)));
        let mut ack = CheckoutAcknowledgement::new();

        assert!(!ack.dismiss(&mut cart));
        assert_eq!(cart.cart().len(), 1);
        assert_eq!(ack.cart_view(cart.cart()), CartView::Lines);
    }
}
