//! Cart collection.

use indexmap::IndexMap;

use crate::cart::LineItem;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// A shopping cart: product id to line item, in insertion order.
///
/// Invariants: every key equals its line's `id`, and no line has quantity 0.
/// The total is always recomputed from the lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: IndexMap<ProductId, LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a snapshot.
    ///
    /// Duplicate ids are merged by summing quantities and zero-quantity lines
    /// are dropped, so a hand-edited snapshot cannot break the invariants.
    pub fn from_lines(lines: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.lines.get_mut(&line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => {
                    cart.lines.insert(line.id.clone(), line);
                }
            }
        }
        cart
    }

    /// Snapshot of the lines in insertion order.
    pub fn to_lines(&self) -> Vec<LineItem> {
        self.lines.values().cloned().collect()
    }

    /// Add one unit of `product`, creating the line if needed.
    ///
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        match self.lines.get_mut(&product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines
                    .insert(product.id.clone(), LineItem::from_product(product));
                1
            }
        }
    }

    /// Add one unit to an existing line. Returns the new quantity, or `None`
    /// if no line exists for `id`.
    pub fn increase(&mut self, id: &ProductId) -> Option<u32> {
        let line = self.lines.get_mut(id)?;
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    /// Remove one unit, dropping the line when it would reach zero.
    ///
    /// Returns the remaining quantity, or `None` if the line is gone (or was
    /// never there).
    pub fn decrease_or_remove(&mut self, id: &ProductId) -> Option<u32> {
        let line = self.lines.get_mut(id)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            return Some(line.quantity);
        }
        self.lines.shift_remove(id);
        None
    }

    /// Remove a line. Returns `false` if it was absent.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.lines.shift_remove(id).is_some()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// `Σ price * quantity` over all lines.
    pub fn total_price(&self) -> Money {
        self.lines.values().map(LineItem::line_total).sum()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.lines.get(id)
    }

    /// Iterate lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.values()
    }
}
