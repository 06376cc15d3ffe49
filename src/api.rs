//! Public API surface for the catalog client.
//!
//! This file consolidates the DTO types exchanged with the catalog
//! service. All types derive Serialize/Deserialize for JSON
//! serialization; the types mirror the service's response models
//! field for field.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog object identifier (service-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub i64);

impl ObjectId {
    pub fn new(value: i64) -> Self {
        ObjectId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single astronomical object as served by the catalog.
///
/// Objects are immutable on the client side: the store only ever
/// replaces the whole collection from a fetch response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstronomicalObject {
    pub id: ObjectId,
    pub name: String,
    pub constellation: String,
    /// Apparent magnitude; lower is brighter.
    pub magnitude: f64,
    /// Distance in light years.
    pub distance_ly: f64,
    /// Spectral class code (e.g. "A1V", "M2Iab").
    pub spectral_type: String,
}

/// Paginated list response wrapper for `GET /objects`.
///
/// `pages` is established server-side as `ceil(total / page_size)`;
/// the client never recomputes it. `page` and `page_size` are the
/// authoritative (possibly clamped) values, not necessarily what was
/// requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedObjects {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub pages: u32,
    pub items: Vec<AstronomicalObject>,
}

/// Statistical summary of the full dataset from `GET /stats`.
///
/// The nullable fields are `None` when the dataset is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub count: u64,
    pub magnitude_min: Option<f64>,
    pub magnitude_max: Option<f64>,
    pub magnitude_avg: Option<f64>,
    pub brightest_object: Option<AstronomicalObject>,
    pub dimmest_object: Option<AstronomicalObject>,
}

impl CatalogStats {
    /// Summary for an empty dataset.
    pub fn empty() -> Self {
        Self {
            count: 0,
            magnitude_min: None,
            magnitude_max: None,
            magnitude_avg: None,
            brightest_object: None,
            dimmest_object: None,
        }
    }
}

/// Histogram payload shared by the magnitude and distance
/// distribution endpoints.
///
/// `bins` holds the bucket midpoints, `counts` the per-bucket tallies;
/// the two vectors are parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn empty() -> Self {
        Self {
            bins: vec![],
            counts: vec![],
        }
    }
}

/// Count of objects per spectral type from `GET /analysis/spectral-breakdown`.
pub type SpectralBreakdown = HashMap<String, u64>;

/// Parallel magnitude/distance vectors for scatter plotting, from
/// `GET /analysis/magnitude-distance-correlation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSample {
    pub magnitudes: Vec<f64>,
    pub distances: Vec<f64>,
}

/// Request body for `POST /admin/refresh-data`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReloadDatasetRequest {
    /// Maximum number of records the service should load.
    pub limit: u32,
}

/// Liveness probe response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<serde_json::Value>,
}
