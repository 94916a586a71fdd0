//! Type-safe key-value persistence layer for the shopfront state core.
//!
//! Provides a small backend trait plus a typed wrapper that handles JSON
//! serialization, so callers store and load domain values directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cartItems", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<Line>> = cache.get("cartItems")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
