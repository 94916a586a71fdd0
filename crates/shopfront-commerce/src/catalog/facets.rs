//! Category facets derived from a product list.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Label of the "no category filter" option.
pub const ALL_CATEGORIES: &str = "All";

/// A category selection.
///
/// On the wire and in facet lists this is the plain label, with
/// [`ALL_CATEGORIES`] standing for "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Only products whose category equals this label.
    Only(String),
}

impl CategoryFilter {
    /// Parse a facet label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label)
        }
    }

    /// The facet label for this selection.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(label) => label,
        }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => product.category == *label,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        Self::from_label(label)
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(label) => label,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `["All", <distinct categories in first-seen order>]`.
///
/// Recomputed from the product list on demand; nothing is stored.
pub fn category_facets(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut facets = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if seen.insert(product.category.as_str()) {
            facets.push(product.category.clone());
        }
    }
    facets
}
