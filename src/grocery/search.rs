use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};

/// A product returned by a price search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

/// Looks up store products for an ingredient name.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(&self, query: &str, postal_code: Option<&str>) -> Result<Vec<Product>>;
}

/// Search that never finds anything, leaving every price to the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProductSearch;

#[async_trait]
impl ProductSearch for OfflineProductSearch {
    async fn search(&self, _query: &str, _postal_code: Option<&str>) -> Result<Vec<Product>> {
        Ok(Vec::new())
    }
}

/// Product search over HTTP: `GET {endpoint}?q=<query>&postal=<code>`.
#[derive(Debug, Clone)]
pub struct HttpProductSearch {
    http: reqwest::Client,
    endpoint: String,
    default_postal_code: String,
}

impl HttpProductSearch {
    pub fn new(endpoint: impl Into<String>, default_postal_code: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_http_client(http, endpoint, default_postal_code))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        default_postal_code: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            default_postal_code: default_postal_code.into(),
        }
    }
}

#[async_trait]
impl ProductSearch for HttpProductSearch {
    async fn search(&self, query: &str, postal_code: Option<&str>) -> Result<Vec<Product>> {
        let postal = postal_code.unwrap_or(&self.default_postal_code);
        debug!(query, postal, "Searching products");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("postal", postal)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::PriceLookupFailed {
                ingredient: query.to_string(),
                reason: format!("product search returned {}", status),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.products)
    }
}
