//! Product records as delivered by the product source.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};

/// A product in the catalog.
///
/// Read-only for the lifetime of a session: the core never edits a product,
/// it only filters, pages, and copies display fields into line items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Single category label.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Average customer rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,
    /// Image reference as stored by the source.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Create a product with the required display fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            rating: None,
            brand: None,
            image: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Image URL with stray quote characters removed.
    ///
    /// Some source rows store the URL JSON-quoted (`"\"https://...\""`).
    pub fn image_url(&self) -> Option<String> {
        self.image
            .as_deref()
            .map(|raw| raw.replace('"', ""))
            .filter(|url| !url.is_empty())
    }

    /// The first `max_chars` characters of the description.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.description.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.description[..idx],
            None => &self.description,
        }
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_term(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Source rows may carry `null` text columns; treat them as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
