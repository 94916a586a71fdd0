//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront state operations.
///
/// None of these are fatal: the cart store and catalog loader absorb them at
/// the collaborator boundary, log them, and fall back to an empty state.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Durable storage failed.
    #[error("Cache error: {0}")]
    Cache(#[from] shopfront_cache::CacheError),

    /// A JSON document (such as a `.json` config file) could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Config(e.to_string())
    }
}
