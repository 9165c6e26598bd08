//! Gateway to the external product feed.

use async_trait::async_trait;
use reqwest::StatusCode;

use restock_catalog::ExternalProduct;
use restock_core::ExternalId;

/// Base location of the feed when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Failure talking to the external source.
///
/// The cause distinguishes "could not reach" from "could not parse" for
/// logging; callers treat both identically. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExternalSourceError {
    #[error("external source unreachable: {0}")]
    Unreachable(String),
    #[error("external source returned a malformed payload: {0}")]
    Malformed(String),
}

/// Capability to fetch the external catalog.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ExternalProduct>, ExternalSourceError>;

    /// `Ok(None)` when the source resolves but knows no such item.
    async fn fetch_by_id(
        &self,
        id: ExternalId,
    ) -> Result<Option<ExternalProduct>, ExternalSourceError>;
}

/// HTTP implementation over the public product feed.
pub struct HttpCatalogGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ExternalSourceError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExternalSourceError::Unreachable(e.to_string()))?;
        Ok(response)
    }
}

impl Default for HttpCatalogGateway {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ExternalCatalog for HttpCatalogGateway {
    async fn fetch_all(&self) -> Result<Vec<ExternalProduct>, ExternalSourceError> {
        let response = self
            .get("/products")
            .await?
            .error_for_status()
            .map_err(|e| ExternalSourceError::Unreachable(e.to_string()))?;

        let products: Vec<ExternalProduct> = response
            .json()
            .await
            .map_err(|e| ExternalSourceError::Malformed(e.to_string()))?;

        tracing::info!(count = products.len(), "fetched external catalog");
        Ok(products)
    }

    async fn fetch_by_id(
        &self,
        id: ExternalId,
    ) -> Result<Option<ExternalProduct>, ExternalSourceError> {
        let response = self.get(&format!("/products/{id}")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|e| ExternalSourceError::Unreachable(e.to_string()))?;

        let product: ExternalProduct = response
            .json()
            .await
            .map_err(|e| ExternalSourceError::Malformed(e.to_string()))?;

        tracing::debug!(%id, "fetched external product");
        Ok(Some(product))
    }
}
