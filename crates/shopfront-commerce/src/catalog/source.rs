//! Product source: the external collaborator that supplies the catalog.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RANGE};
use reqwest::{Client, StatusCode};

use crate::catalog::Product;
use crate::config::CatalogConfig;

/// Error type for product fetches.
#[derive(Debug, thiserror::Error)]
pub enum ProductSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid source configuration: {0}")]
    InvalidConfig(String),

    #[error("product source unavailable: {0}")]
    Unavailable(String),
}

/// A read-only supplier of product records.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch at most `limit` products, in source order.
    async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, ProductSourceError>;
}

/// In-memory source for tests and offline sessions.
#[derive(Debug, Clone)]
pub struct StaticProductSource {
    outcome: Result<Vec<Product>, String>,
}

impl StaticProductSource {
    /// A source that always returns `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            outcome: Ok(products),
        }
    }

    /// A source whose every fetch fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, ProductSourceError> {
        match &self.outcome {
            Ok(products) => Ok(products.iter().take(limit).cloned().collect()),
            Err(reason) => Err(ProductSourceError::Unavailable(reason.clone())),
        }
    }
}

/// HTTP source speaking the PostgREST dialect: `GET {base}/products?select=*`
/// bounded by a `Range` header.
pub struct RestProductSource {
    client: Client,
    base_url: String,
    authenticated: bool,
}

impl fmt::Debug for RestProductSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestProductSource")
            .field("base_url", &self.base_url)
            .field("api_key", &self.authenticated.then_some("<redacted>"))
            .finish_non_exhaustive()
    }
}

impl RestProductSource {
    /// Build a source for `base_url`, authenticating with `api_key` when given.
    ///
    /// # Errors
    ///
    /// Returns [`ProductSourceError::InvalidConfig`] if the key is not a valid
    /// header value, or [`ProductSourceError::Http`] if the client cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProductSourceError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let invalid = |_| ProductSourceError::InvalidConfig("api key is not a valid header".into());
            headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid)?,
            );
        }
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated: api_key.is_some(),
        })
    }

    /// Build a source from the `[catalog]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ProductSourceError::InvalidConfig`] if no `source_url` is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ProductSourceError> {
        let base_url = config
            .source_url
            .as_deref()
            .ok_or_else(|| ProductSourceError::InvalidConfig("catalog.source_url is not set".into()))?;
        Self::new(base_url, config.api_key.as_deref(), config.fetch_timeout())
    }

    /// URL of the products collection.
    pub fn products_url(&self) -> String {
        format!("{}/products?select=*", self.base_url)
    }

    /// `Range` header value covering the first `limit` rows.
    fn range_header(limit: usize) -> String {
        format!("0-{}", limit.saturating_sub(1))
    }
}

#[async_trait]
impl ProductSource for RestProductSource {
    async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, ProductSourceError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let url = self.products_url();
        let response = self
            .client
            .get(&url)
            .header("Range-Unit", "items")
            .header(RANGE, Self::range_header(limit))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(ProductSourceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|source| ProductSourceError::Deserialize {
                context: url.clone(),
                source,
            })?;
        let products = parse_rows(rows, limit);
        tracing::debug!(count = products.len(), %url, "products fetched");
        Ok(products)
    }
}

/// Decode each row on its own. Rows that are not valid products are logged
/// and skipped so one bad record does not hide the rest of the catalog.
fn parse_rows(rows: Vec<serde_json::Value>, limit: usize) -> Vec<Product> {
    rows.into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Product>(row) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed product row");
                None
            }
        })
        .collect()
}
