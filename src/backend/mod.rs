//! Catalog backend abstraction.
//!
//! The store talks to the catalog service through the [`CatalogBackend`]
//! trait so that different transports can be swapped easily:
//!
//! - [`HttpBackend`]: reqwest-based client for the real service
//! - [`LocalBackend`]: in-memory implementation for unit testing and
//!   local development
//!
//! Implementations must be `Send + Sync` to work with async Rust.

use async_trait::async_trait;

use crate::api::{CatalogStats, CorrelationSample, Histogram, PaginatedObjects, SpectralBreakdown};
use crate::store::filters::FilterSet;

pub mod error;

#[cfg(feature = "http-backend")]
pub mod http;

#[cfg(feature = "local-backend")]
pub mod local;

pub use error::{BackendError, BackendResult};

#[cfg(feature = "http-backend")]
pub use http::HttpBackend;

#[cfg(feature = "local-backend")]
pub use local::LocalBackend;

#[cfg(not(any(feature = "http-backend", feature = "local-backend")))]
compile_error!("Enable at least one backend feature.");

/// Transport-agnostic interface to the catalog service.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Fetch the summary statistics for the full dataset.
    ///
    /// Maps to `GET /stats`.
    async fn fetch_stats(&self) -> BackendResult<CatalogStats>;

    /// Fetch one page of objects matching `filters`.
    ///
    /// Maps to `GET /objects` with the filter set as query parameters.
    /// The returned envelope carries the authoritative page and
    /// page_size, which may differ from the requested ones.
    async fn fetch_objects(&self, filters: &FilterSet) -> BackendResult<PaginatedObjects>;

    /// Fetch the magnitude histogram with `bins` buckets.
    ///
    /// Maps to `GET /analysis/magnitude-distribution?bins=N`.
    async fn magnitude_distribution(&self, bins: u32) -> BackendResult<Histogram>;

    /// Fetch the per-spectral-type object counts.
    ///
    /// Maps to `GET /analysis/spectral-breakdown`.
    async fn spectral_breakdown(&self) -> BackendResult<SpectralBreakdown>;

    /// Fetch the distance histogram with `bins` buckets.
    ///
    /// Maps to `GET /analysis/distance-distribution?bins=N`.
    async fn distance_distribution(&self, bins: u32) -> BackendResult<Histogram>;

    /// Fetch the magnitude/distance scatter sample.
    ///
    /// Maps to `GET /analysis/magnitude-distance-correlation`.
    async fn correlation(&self) -> BackendResult<CorrelationSample>;

    /// Ask the service to reload its working dataset bounded by `limit`.
    ///
    /// Maps to `POST /admin/refresh-data`. This mutates what the
    /// service considers the full catalog; callers are expected to
    /// re-fetch afterwards.
    async fn reload_dataset(&self, limit: u32) -> BackendResult<()>;

    /// Liveness check. Maps to `GET /health`.
    async fn health(&self) -> BackendResult<bool>;
}
