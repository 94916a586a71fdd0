//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopfront_cache::FileStore;

use crate::cart::DEFAULT_CART_KEY;
use crate::error::CommerceError;
use crate::search::DEFAULT_PAGE_SIZE;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// Catalog loading and paging.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Transient notifications.
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    ///
    /// Read and TOML failures surface as [`CommerceError::Config`], JSON
    /// failures as [`CommerceError::Serialization`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(content)?)
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Storage key of the cart snapshot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for the file store. `None` keeps the cart in memory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl CartConfig {
    /// Open the file store under `store_dir`, if one is configured.
    pub fn file_store(&self) -> Result<Option<FileStore>, CommerceError> {
        match &self.store_dir {
            Some(dir) => Ok(Some(FileStore::open(dir.clone())?)),
            None => Ok(None),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            store_dir: None,
        }
    }
}

/// Catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum products requested from the source per session.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Base URL of the REST product source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// API key sent to the product source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout for the product source, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_fetch_limit() -> usize {
    500
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl CatalogConfig {
    /// Page size, never below 1.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Fetch timeout as a `Duration`.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            fetch_limit: default_fetch_limit(),
            source_url: None,
            api_key: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// Notification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Toast auto-hide delay in milliseconds.
    #[serde(default = "default_toast_millis")]
    pub toast_millis: u64,

    /// Product names longer than this are truncated in the toast.
    #[serde(default = "default_toast_name_max_chars")]
    pub toast_name_max_chars: usize,
}

fn default_toast_millis() -> u64 {
    2500
}

fn default_toast_name_max_chars() -> usize {
    30
}

impl NotifyConfig {
    /// Toast delay as a `Duration`.
    pub fn toast_delay(&self) -> Duration {
        Duration::from_millis(self.toast_millis)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            toast_millis: default_toast_millis(),
            toast_name_max_chars: default_toast_name_max_chars(),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.cart.storage_key, "cartItems");
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.fetch_limit, 500);
        assert_eq!(config.notify.toast_delay(), Duration::from_millis(2500));
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_partial_toml() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [catalog]
            page_size = 24
            source_url = "https://shop.example/rest/v1"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.page_size, 24);
        assert_eq!(config.catalog.fetch_limit, 500);
        assert_eq!(
            config.catalog.source_url.as_deref(),
            Some("https://shop.example/rest/v1")
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.cart, CartConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            StorefrontConfig::from_toml_str("").unwrap(),
            StorefrontConfig::default()
        );
    }

    #[test]
    fn test_invalid_toml() {
        let result = StorefrontConfig::from_toml_str("[catalog]\npage_size = \"many\"");
        assert!(matches!(result, Err(CommerceError::Config(_))));
    }

    #[test]
    fn test_effective_page_size() {
        let catalog = CatalogConfig {
            page_size: 0,
            ..CatalogConfig::default()
        };
        assert_eq!(catalog.effective_page_size(), 1);
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("shopfront.toml");
        std::fs::write(&toml_path, "[notify]\ntoast_millis = 1000\n").unwrap();
        let json_path = dir.path().join("shopfront.json");
        std::fs::write(&json_path, r#"{"cart": {"storage_key": "cart:v2"}}"#).unwrap();

        let from_toml = StorefrontConfig::load(&toml_path).unwrap();
        assert_eq!(from_toml.notify.toast_millis, 1000);

        let from_json = StorefrontConfig::load(&json_path).unwrap();
        assert_eq!(from_json.cart.storage_key, "cart:v2");
    }

    #[test]
    fn test_file_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = CartConfig::default();
        assert!(cart.file_store().unwrap().is_none());

        cart.store_dir = Some(dir.path().join("carts"));
        let store = cart.file_store().unwrap().unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_malformed_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopfront.json");
        std::fs::write(&path, r#"{"cart": "#).unwrap();

        let result = StorefrontConfig::load(&path);
        assert!(matches!(result, Err(CommerceError::Serialization(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = StorefrontConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(CommerceError::Config(_))));
    }
}
