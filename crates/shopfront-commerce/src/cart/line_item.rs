//! Line item type.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product in the cart and how many of it are selected.
///
/// Display fields are copied from the product when the line is created, so
/// the cart renders without the catalog being loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Identifier of the originating product.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Description, shown as the line's subtitle.
    #[serde(default)]
    pub description: String,
    /// Quantity. Never zero while the line is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// A new line for `product` with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            quantity: 1,
        }
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Image URL with stray quote characters removed.
    pub fn image_url(&self) -> Option<String> {
        self.image
            .as_deref()
            .map(|raw| raw.replace('"', ""))
            .filter(|url| !url.is_empty())
    }
}
