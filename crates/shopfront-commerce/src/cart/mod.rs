//! Shopping cart module.
//!
//! Contains the line item type, the cart collection, and the store that
//! keeps the cart in sync with durable storage.

mod cart;
mod line_item;
mod store;

pub use cart::Cart;
pub use line_item::LineItem;
pub use store::{CartStore, DEFAULT_CART_KEY};
