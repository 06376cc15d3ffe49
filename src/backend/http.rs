//! reqwest-based implementation of [`CatalogBackend`].
//!
//! Thin HTTP plumbing: every method builds one request against the
//! configured base URL, checks the status, and decodes the JSON body
//! into the matching DTO from [`crate::api`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use super::error::{BackendError, BackendResult};
use super::CatalogBackend;
use crate::api::{
    ApiErrorBody, CatalogStats, CorrelationSample, HealthResponse, Histogram, PaginatedObjects,
    ReloadDatasetRequest, SpectralBreakdown,
};
use crate::config::ClientConfig;
use crate::store::filters::FilterSet;

/// HTTP client for the catalog service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend from a base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::InvalidRequest(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// Build a backend from environment-driven configuration.
    pub fn from_config(config: &ClientConfig) -> BackendResult<Self> {
        Self::new(&config.base_url, config.http_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status and decode the body, turning non-2xx responses
    /// into [`BackendError::Status`] with the server's detail message
    /// when one is present.
    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> BackendResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(ApiErrorBody {
                detail: Some(detail),
            }) => match detail.as_str() {
                Some(text) => text.to_string(),
                None => detail.to_string(),
            },
            _ => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn fetch_stats(&self) -> BackendResult<CatalogStats> {
        let response = self.client.get(self.url("/stats")).send().await?;
        Self::decode(response).await
    }

    async fn fetch_objects(&self, filters: &FilterSet) -> BackendResult<PaginatedObjects> {
        // serde skips unset optional filters, so they never appear in
        // the query string.
        let response = self
            .client
            .get(self.url("/objects"))
            .query(filters)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn magnitude_distribution(&self, bins: u32) -> BackendResult<Histogram> {
        let response = self
            .client
            .get(self.url("/analysis/magnitude-distribution"))
            .query(&[("bins", bins)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn spectral_breakdown(&self) -> BackendResult<SpectralBreakdown> {
        let response = self
            .client
            .get(self.url("/analysis/spectral-breakdown"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn distance_distribution(&self, bins: u32) -> BackendResult<Histogram> {
        let response = self
            .client
            .get(self.url("/analysis/distance-distribution"))
            .query(&[("bins", bins)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn correlation(&self) -> BackendResult<CorrelationSample> {
        let response = self
            .client
            .get(self.url("/analysis/magnitude-distance-correlation"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn reload_dataset(&self, limit: u32) -> BackendResult<()> {
        let response = self
            .client
            .post(self.url("/admin/refresh-data"))
            .json(&ReloadDatasetRequest { limit })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        // Reuse the error-body decoding; the Ok type is irrelevant here.
        match Self::decode::<serde_json::Value>(response).await {
            Err(e) => Err(e),
            Ok(_) => Err(BackendError::Status {
                status: status.as_u16(),
                message: "request failed".to_string(),
            }),
        }
    }

    async fn health(&self) -> BackendResult<bool> {
        let response = self.client.get(self.url("/health")).send().await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(false);
        }
        let body: HealthResponse = Self::decode(response).await?;
        Ok(body.status == "ok")
    }
}
