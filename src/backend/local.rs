//! In-memory implementation of [`CatalogBackend`].
//!
//! Reimplements the catalog service's filtering, pagination, and
//! analysis semantics over an in-process dataset. Used as the test
//! double and for local development without a running service.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::BackendResult;
use super::CatalogBackend;
use crate::api::{
    AstronomicalObject, CatalogStats, CorrelationSample, Histogram, ObjectId, PaginatedObjects,
    SpectralBreakdown,
};
use crate::store::filters::FilterSet;

/// Upper bound the service enforces on `page_size`.
const MAX_PAGE_SIZE: u32 = 100;

/// In-memory catalog backend.
///
/// Holds a seed dataset and a working subset of it. `reload_dataset`
/// truncates the working set to the first `limit` seed records, the
/// way the service re-fetches its source bounded by a record limit.
pub struct LocalBackend {
    seed: Vec<AstronomicalObject>,
    dataset: RwLock<Vec<AstronomicalObject>>,
}

impl LocalBackend {
    /// Backend over the built-in bright-star sample.
    pub fn new() -> Self {
        Self::with_dataset(sample_objects())
    }

    /// Backend over a caller-provided dataset.
    pub fn with_dataset(objects: Vec<AstronomicalObject>) -> Self {
        Self {
            seed: objects.clone(),
            dataset: RwLock::new(objects),
        }
    }

    /// Number of objects currently in the working dataset.
    pub fn len(&self) -> usize {
        self.dataset.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.read().is_empty()
    }

    fn matches(obj: &AstronomicalObject, filters: &FilterSet) -> bool {
        if let Some(min) = filters.magnitude_min {
            if obj.magnitude < min {
                return false;
            }
        }
        if let Some(max) = filters.magnitude_max {
            if obj.magnitude > max {
                return false;
            }
        }
        if let Some(min) = filters.distance_min {
            if obj.distance_ly < min {
                return false;
            }
        }
        if let Some(max) = filters.distance_max {
            if obj.distance_ly > max {
                return false;
            }
        }
        if let Some(ref constellation) = filters.constellation {
            if !obj.constellation.eq_ignore_ascii_case(constellation) {
                return false;
            }
        }
        if let Some(ref spectral) = filters.spectral_type {
            if !obj.spectral_type.eq_ignore_ascii_case(spectral) {
                return false;
            }
        }
        if let Some(ref search) = filters.search {
            let haystack =
                format!("{} {}", obj.name, obj.constellation).to_lowercase();
            if !haystack.contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogBackend for LocalBackend {
    async fn fetch_stats(&self) -> BackendResult<CatalogStats> {
        let dataset = self.dataset.read();
        if dataset.is_empty() {
            return Ok(CatalogStats::empty());
        }

        let brightest = dataset
            .iter()
            .min_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
        let dimmest = dataset
            .iter()
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
        let sum: f64 = dataset.iter().map(|o| o.magnitude).sum();

        Ok(CatalogStats {
            count: dataset.len() as u64,
            magnitude_min: brightest.map(|o| o.magnitude),
            magnitude_max: dimmest.map(|o| o.magnitude),
            magnitude_avg: Some(sum / dataset.len() as f64),
            brightest_object: brightest.cloned(),
            dimmest_object: dimmest.cloned(),
        })
    }

    async fn fetch_objects(&self, filters: &FilterSet) -> BackendResult<PaginatedObjects> {
        let dataset = self.dataset.read();
        let matched: Vec<&AstronomicalObject> = dataset
            .iter()
            .filter(|obj| Self::matches(obj, filters))
            .collect();

        let total = matched.len() as u64;
        let page_size = filters.page_size.clamp(1, MAX_PAGE_SIZE);
        let pages = if total == 0 {
            0
        } else {
            (total as u32).div_ceil(page_size)
        };
        // Clamp out-of-range page requests and echo the clamped value.
        let page = filters.page.clamp(1, pages.max(1));

        let start = (page as usize - 1) * page_size as usize;
        let items: Vec<AstronomicalObject> = matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(PaginatedObjects {
            total,
            page,
            page_size,
            pages,
            items,
        })
    }

    async fn magnitude_distribution(&self, bins: u32) -> BackendResult<Histogram> {
        let dataset = self.dataset.read();
        let values: Vec<f64> = dataset.iter().map(|o| o.magnitude).collect();
        Ok(histogram(&values, bins))
    }

    async fn spectral_breakdown(&self) -> BackendResult<SpectralBreakdown> {
        let dataset = self.dataset.read();
        let mut counts = SpectralBreakdown::new();
        for obj in dataset.iter() {
            if obj.spectral_type.is_empty() {
                continue;
            }
            *counts.entry(obj.spectral_type.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn distance_distribution(&self, bins: u32) -> BackendResult<Histogram> {
        let dataset = self.dataset.read();
        let values: Vec<f64> = dataset.iter().map(|o| o.distance_ly).collect();
        Ok(histogram(&values, bins))
    }

    async fn correlation(&self) -> BackendResult<CorrelationSample> {
        let dataset = self.dataset.read();
        Ok(CorrelationSample {
            magnitudes: dataset.iter().map(|o| o.magnitude).collect(),
            distances: dataset.iter().map(|o| o.distance_ly).collect(),
        })
    }

    async fn reload_dataset(&self, limit: u32) -> BackendResult<()> {
        let mut dataset = self.dataset.write();
        *dataset = self.seed.iter().take(limit as usize).cloned().collect();
        tracing::debug!(limit, count = dataset.len(), "reloaded local dataset");
        Ok(())
    }

    async fn health(&self) -> BackendResult<bool> {
        Ok(true)
    }
}

/// Equal-width histogram over `values` with bucket-midpoint labels.
///
/// The maximum value is counted in the last bucket rather than opening
/// a bucket of its own.
fn histogram(values: &[f64], bins: u32) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram::empty();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    if width == 0.0 {
        // All values identical: one occupied bucket.
        let mut counts = vec![0u64; bins as usize];
        counts[0] = values.len() as u64;
        return Histogram {
            bins: vec![min; bins as usize],
            counts,
        };
    }

    let labels: Vec<f64> = (0..bins)
        .map(|i| min + (i as f64 + 0.5) * width)
        .collect();
    let mut counts = vec![0u64; bins as usize];
    for &value in values {
        // `(value - min) / width` can round up to `bins` for values just
        // below the max, so clamp into the last bucket.
        let idx = if value == max {
            bins as usize - 1
        } else {
            (((value - min) / width) as usize).min(bins as usize - 1)
        };
        counts[idx] += 1;
    }

    Histogram {
        bins: labels,
        counts,
    }
}

/// Deterministic bright-star sample used by the default backend and
/// the test suite.
pub fn sample_objects() -> Vec<AstronomicalObject> {
    let rows: [(i64, &str, &str, f64, f64, &str); 10] = [
        (1, "Sirius", "Canis Major", -1.46, 8.6, "A1V"),
        (2, "Canopus", "Carina", -0.74, 310.0, "B8Ia"),
        (3, "Arcturus", "Bootes", -0.05, 36.7, "K1.5III"),
        (4, "Vega", "Lyra", 0.03, 25.0, "A0V"),
        (5, "Capella", "Auriga", 0.08, 42.9, "G5III"),
        (6, "Rigel", "Orion", 0.12, 860.0, "B8Ia"),
        (7, "Procyon", "Canis Minor", 0.38, 11.5, "F5IV-V"),
        (8, "Achernar", "Eridanus", 0.46, 139.0, "B6Vep"),
        (9, "Betelgeuse", "Orion", 0.42, 642.0, "M2Iab"),
        (10, "Altair", "Aquila", 0.77, 16.7, "A7V"),
    ];

    rows.into_iter()
        .map(
            |(id, name, constellation, magnitude, distance_ly, spectral_type)| {
                AstronomicalObject {
                    id: ObjectId::new(id),
                    name: name.to_string(),
                    constellation: constellation.to_string(),
                    magnitude,
                    distance_ly,
                    spectral_type: spectral_type.to_string(),
                }
            },
        )
        .collect()
}
