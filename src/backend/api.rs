//! HTTP client for the public book catalog

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::FetchError;
use super::types::{ApiErrorResponse, BookSummary, PageQuery, VolumesResponse};
use crate::config::Config;

/// Anything that can answer a page query
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<BookSummary>, FetchError>;
}

/// Client for the catalog volumes endpoint
pub struct CatalogClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, &config.base_url, config.api_key.clone()))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        }
    }

    fn query_params(&self, query: &PageQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.q()),
            ("maxResults", query.limit.to_string()),
            ("startIndex", query.offset.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    /// Download a cover image
    pub async fn fetch_thumbnail(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<BookSummary>, FetchError> {
        tracing::debug!(q = %query.q(), limit = query.limit, offset = query.offset, "Fetching catalog page");

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let page: VolumesResponse = response.json().await?;
        Ok(page.items.into_iter().map(BookSummary::from).collect())
    }
}
