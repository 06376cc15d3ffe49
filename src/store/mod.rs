//! Catalog state store.
//!
//! [`CatalogStore`] owns the filter state, the last-fetched listing and
//! statistics, and the lazily-fetched analysis snapshots. UI code calls
//! the action methods and reads the current state back through the
//! accessors; all mutation goes through the actions.
//!
//! # Fetch lifecycle
//!
//! Refresh-style actions move through an explicit phase:
//!
//! ```text
//! Idle ──refresh()──▶ Loading ──ok──▶ Idle (data replaced)
//!                        │
//!                        └──err──▶ Failed(message) (data untouched)
//! ```
//!
//! Previously-loaded data is kept alongside the phase, so a failed
//! refresh never discards what the user is already looking at.
//!
//! # Concurrent refreshes
//!
//! Overlapping `refresh()` calls are not queued. Each call takes a
//! monotonically increasing ticket; a completion whose ticket is no
//! longer the newest is discarded instead of overwriting fresher data.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::{
    AstronomicalObject, CatalogStats, CorrelationSample, Histogram, SpectralBreakdown,
};
use crate::backend::{BackendError, CatalogBackend};
use crate::settings::SettingsStore;

pub mod filters;

pub use filters::{FilterPatch, FilterSet, DEFAULT_PAGE_SIZE};

/// Bin count used when the caller does not pick one.
pub const DEFAULT_HISTOGRAM_BINS: u32 = 10;

/// Where the store is in its fetch lifecycle.
///
/// A single tagged value instead of independent loading/error fields,
/// so "loading with a stale error still set" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch in flight; the last one (if any) succeeded.
    Idle,
    /// A refresh is in flight.
    Loading,
    /// The last refresh failed with this message.
    Failed(String),
}

/// Error type for store actions.
///
/// Every action reports failure through its return value; `refresh()`
/// additionally mirrors the message into [`FetchPhase::Failed`] because
/// the UI reads it from state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The service rejected the dataset reload; the preference was not
    /// changed and nothing was persisted.
    #[error("failed to update max records: {source}")]
    UpdateMaxRecords {
        #[source]
        source: BackendError,
    },
}

#[derive(Debug)]
struct StoreState {
    filters: FilterSet,
    phase: FetchPhase,
    stats: Option<CatalogStats>,
    objects: Vec<AstronomicalObject>,
    total: u64,
    pages: u32,
    magnitude_distribution: Option<Histogram>,
    spectral_breakdown: Option<SpectralBreakdown>,
    distance_distribution: Option<Histogram>,
    correlation: Option<CorrelationSample>,
    /// Ticket of the newest refresh issued.
    refresh_seq: u64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            filters: FilterSet::default(),
            phase: FetchPhase::Idle,
            stats: None,
            objects: vec![],
            total: 0,
            pages: 0,
            magnitude_distribution: None,
            spectral_breakdown: None,
            distance_distribution: None,
            correlation: None,
            refresh_seq: 0,
        }
    }
}

/// Client-side state store for the catalog browsing UI.
pub struct CatalogStore {
    backend: Arc<dyn CatalogBackend>,
    settings: SettingsStore,
    state: RwLock<StoreState>,
}

impl CatalogStore {
    /// Create a store over `backend`, loading the persisted preference
    /// from `settings`.
    pub fn new(backend: Arc<dyn CatalogBackend>, settings: SettingsStore) -> Self {
        Self {
            backend,
            settings,
            state: RwLock::new(StoreState::new()),
        }
    }

    /// Create a store wired to the real service per environment config.
    #[cfg(feature = "http-backend")]
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, BackendError> {
        let backend = Arc::new(crate::backend::HttpBackend::from_config(config)?);
        let settings = SettingsStore::new(config.settings_path.clone());
        Ok(Self::new(backend, settings))
    }

    // ==================== Actions ====================

    /// Shallow-merge `patch` into the current filters.
    ///
    /// No fetch is triggered and no validation is performed; malformed
    /// values are the service's concern. Call [`refresh`](Self::refresh)
    /// to see the change reflected in the listing.
    pub fn set_filters(&self, patch: FilterPatch) {
        self.state.write().filters.apply(patch);
    }

    /// Re-fetch statistics and the current object page concurrently.
    ///
    /// Both requests must succeed; either failure fails the pair and
    /// leaves the previous stats and objects untouched. On success the
    /// envelope's authoritative `page`/`page_size` overwrite the
    /// requested ones, reflecting any server-side clamping.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let (ticket, filters) = {
            let mut state = self.state.write();
            state.refresh_seq += 1;
            state.phase = FetchPhase::Loading;
            (state.refresh_seq, state.filters.clone())
        };

        let result = tokio::try_join!(
            self.backend.fetch_stats(),
            self.backend.fetch_objects(&filters)
        );

        let mut state = self.state.write();
        if state.refresh_seq != ticket {
            // A newer refresh owns the phase and the data now.
            tracing::debug!(
                ticket,
                latest = state.refresh_seq,
                "discarding superseded refresh response"
            );
            return result.map(|_| ()).map_err(StoreError::from);
        }

        match result {
            Ok((stats, envelope)) => {
                state.stats = Some(stats);
                state.objects = envelope.items;
                state.total = envelope.total;
                state.pages = envelope.pages;
                state.filters.page = envelope.page;
                state.filters.page_size = envelope.page_size;
                state.phase = FetchPhase::Idle;
                tracing::debug!(
                    total = state.total,
                    page = state.filters.page,
                    "refreshed catalog listing"
                );
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "catalog refresh failed");
                state.phase = FetchPhase::Failed(message);
                Err(e.into())
            }
        }
    }

    /// Fetch and cache the magnitude histogram.
    ///
    /// On failure the previous snapshot (if any) is kept and the error
    /// is returned; the shared fetch phase is not touched.
    pub async fn fetch_magnitude_distribution(&self, bins: u32) -> Result<(), StoreError> {
        let histogram = self.backend.magnitude_distribution(bins).await?;
        self.state.write().magnitude_distribution = Some(histogram);
        Ok(())
    }

    /// Fetch and cache the per-spectral-type counts.
    pub async fn fetch_spectral_breakdown(&self) -> Result<(), StoreError> {
        let breakdown = self.backend.spectral_breakdown().await?;
        self.state.write().spectral_breakdown = Some(breakdown);
        Ok(())
    }

    /// Fetch and cache the distance histogram.
    pub async fn fetch_distance_distribution(&self, bins: u32) -> Result<(), StoreError> {
        let histogram = self.backend.distance_distribution(bins).await?;
        self.state.write().distance_distribution = Some(histogram);
        Ok(())
    }

    /// Fetch and cache the magnitude/distance scatter sample.
    pub async fn fetch_correlation(&self) -> Result<(), StoreError> {
        let sample = self.backend.correlation().await?;
        self.state.write().correlation = Some(sample);
        Ok(())
    }

    /// Restore the default filters, then run exactly one refresh.
    pub async fn reset_filters(&self) -> Result<(), StoreError> {
        self.state.write().filters = FilterSet::default();
        self.refresh().await
    }

    /// Change the maximum-records preference.
    ///
    /// The service is told to reload its dataset first; only when that
    /// succeeds is the preference applied and persisted, followed by a
    /// refresh so the UI reflects the new dataset. A persistence
    /// failure is logged but does not fail the action (the preference
    /// is already applied in memory).
    pub async fn update_max_records(&self, limit: u32) -> Result<(), StoreError> {
        self.backend
            .reload_dataset(limit)
            .await
            .map_err(|source| StoreError::UpdateMaxRecords { source })?;

        if let Err(e) = self.settings.set_max_records(limit) {
            tracing::warn!(
                path = %self.settings.path().display(),
                error = %e,
                "failed to persist max records"
            );
        }

        self.refresh().await
    }

    /// Liveness check against the backend.
    pub async fn health(&self) -> Result<bool, StoreError> {
        Ok(self.backend.health().await?)
    }

    // ==================== Accessors ====================

    /// Current filter set (server-echoed pagination after a refresh).
    pub fn filters(&self) -> FilterSet {
        self.state.read().filters.clone()
    }

    /// Objects on the current page, from the last successful refresh.
    pub fn objects(&self) -> Vec<AstronomicalObject> {
        self.state.read().objects.clone()
    }

    /// Summary statistics, `None` until the first successful refresh.
    pub fn stats(&self) -> Option<CatalogStats> {
        self.state.read().stats.clone()
    }

    /// Total matching objects from the last successful refresh.
    pub fn total(&self) -> u64 {
        self.state.read().total
    }

    /// Total pages from the last successful refresh.
    pub fn pages(&self) -> u32 {
        self.state.read().pages
    }

    /// Current fetch phase.
    pub fn phase(&self) -> FetchPhase {
        self.state.read().phase.clone()
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read().phase == FetchPhase::Loading
    }

    /// Message of the last failed refresh, if the store is in the
    /// failed phase.
    pub fn error(&self) -> Option<String> {
        match &self.state.read().phase {
            FetchPhase::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn magnitude_distribution(&self) -> Option<Histogram> {
        self.state.read().magnitude_distribution.clone()
    }

    pub fn spectral_breakdown(&self) -> Option<SpectralBreakdown> {
        self.state.read().spectral_breakdown.clone()
    }

    pub fn distance_distribution(&self) -> Option<Histogram> {
        self.state.read().distance_distribution.clone()
    }

    pub fn correlation(&self) -> Option<CorrelationSample> {
        self.state.read().correlation.clone()
    }

    /// Current maximum-records preference.
    pub fn max_records(&self) -> u32 {
        self.settings.max_records()
    }
}

#[cfg(all(test, feature = "local-backend"))]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use tempfile::tempdir;

    fn store_over_sample() -> (CatalogStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let settings = SettingsStore::new(dir.path().join("settings.json"));
        let store = CatalogStore::new(Arc::new(LocalBackend::new()), settings);
        (store, dir)
    }

    #[tokio::test]
    async fn refresh_populates_stats_and_objects() {
        let (store, _dir) = store_over_sample();
        assert_eq!(store.phase(), FetchPhase::Idle);
        assert!(store.stats().is_none());

        store.refresh().await.unwrap();

        assert_eq!(store.phase(), FetchPhase::Idle);
        assert_eq!(store.total(), 10);
        assert_eq!(store.pages(), 1);
        assert_eq!(store.objects().len(), 10);
        assert_eq!(store.stats().unwrap().count, 10);
    }

    #[tokio::test]
    async fn analysis_snapshots_start_unset_and_fill_on_fetch() {
        let (store, _dir) = store_over_sample();
        assert!(store.magnitude_distribution().is_none());
        assert!(store.spectral_breakdown().is_none());
        assert!(store.correlation().is_none());

        store
            .fetch_magnitude_distribution(DEFAULT_HISTOGRAM_BINS)
            .await
            .unwrap();
        store.fetch_spectral_breakdown().await.unwrap();
        store.fetch_correlation().await.unwrap();

        let histogram = store.magnitude_distribution().unwrap();
        assert_eq!(histogram.bins.len(), DEFAULT_HISTOGRAM_BINS as usize);
        assert_eq!(histogram.counts.iter().sum::<u64>(), 10);
        assert_eq!(store.spectral_breakdown().unwrap()["B8Ia"], 2);
        assert_eq!(store.correlation().unwrap().magnitudes.len(), 10);
    }

    #[tokio::test]
    async fn set_filters_does_not_fetch() {
        let (store, _dir) = store_over_sample();
        store.set_filters(FilterPatch::new().with_constellation("Orion"));

        assert_eq!(store.filters().constellation.as_deref(), Some("Orion"));
        // no fetch happened
        assert!(store.objects().is_empty());
        assert!(store.stats().is_none());
    }
}
