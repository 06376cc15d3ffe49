//! Test-support backend wrapper with call counting, failure
//! injection, and a one-shot gate for interleaving tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use astro_catalog_client::api::{
    CatalogStats, CorrelationSample, Histogram, PaginatedObjects, SpectralBreakdown,
};
use astro_catalog_client::backend::{
    BackendError, BackendResult, CatalogBackend, LocalBackend,
};
use astro_catalog_client::store::FilterSet;

/// Wraps a [`LocalBackend`] with the knobs the store tests need.
pub struct TestBackend {
    inner: LocalBackend,
    pub stats_calls: AtomicUsize,
    pub objects_calls: AtomicUsize,
    pub reload_calls: AtomicUsize,
    fail_stats: AtomicBool,
    fail_objects: AtomicBool,
    fail_reload: AtomicBool,
    fail_analysis: AtomicBool,
    /// When armed, the next `fetch_objects` call blocks until a permit
    /// is added to `gate`.
    gate_next_objects: AtomicBool,
    gate: Semaphore,
}

impl TestBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: LocalBackend::new(),
            stats_calls: AtomicUsize::new(0),
            objects_calls: AtomicUsize::new(0),
            reload_calls: AtomicUsize::new(0),
            fail_stats: AtomicBool::new(false),
            fail_objects: AtomicBool::new(false),
            fail_reload: AtomicBool::new(false),
            fail_analysis: AtomicBool::new(false),
            gate_next_objects: AtomicBool::new(false),
            gate: Semaphore::new(0),
        })
    }

    pub fn fail_stats(&self, fail: bool) {
        self.fail_stats.store(fail, Ordering::SeqCst);
    }

    pub fn fail_objects(&self, fail: bool) {
        self.fail_objects.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reload(&self, fail: bool) {
        self.fail_reload.store(fail, Ordering::SeqCst);
    }

    /// Fail the four analysis endpoints.
    pub fn fail_analysis(&self, fail: bool) {
        self.fail_analysis.store(fail, Ordering::SeqCst);
    }

    /// Make the next `fetch_objects` call block until [`release`](Self::release).
    pub fn gate_next_objects(&self) {
        self.gate_next_objects.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn objects_call_count(&self) -> usize {
        self.objects_calls.load(Ordering::SeqCst)
    }

    pub fn reload_call_count(&self) -> usize {
        self.reload_calls.load(Ordering::SeqCst)
    }

    fn refused() -> BackendError {
        BackendError::Transport("connection refused".to_string())
    }
}

#[async_trait]
impl CatalogBackend for TestBackend {
    async fn fetch_stats(&self) -> BackendResult<CatalogStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.fetch_stats().await
    }

    async fn fetch_objects(&self, filters: &FilterSet) -> BackendResult<PaginatedObjects> {
        self.objects_calls.fetch_add(1, Ordering::SeqCst);
        if self.gate_next_objects.swap(false, Ordering::SeqCst) {
            let permit = self.gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        if self.fail_objects.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.fetch_objects(filters).await
    }

    async fn magnitude_distribution(&self, bins: u32) -> BackendResult<Histogram> {
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.magnitude_distribution(bins).await
    }

    async fn spectral_breakdown(&self) -> BackendResult<SpectralBreakdown> {
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.spectral_breakdown().await
    }

    async fn distance_distribution(&self, bins: u32) -> BackendResult<Histogram> {
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.distance_distribution(bins).await
    }

    async fn correlation(&self) -> BackendResult<CorrelationSample> {
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.correlation().await
    }

    async fn reload_dataset(&self, limit: u32) -> BackendResult<()> {
        self.reload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reload.load(Ordering::SeqCst) {
            return Err(Self::refused());
        }
        self.inner.reload_dataset(limit).await
    }

    async fn health(&self) -> BackendResult<bool> {
        self.inner.health().await
    }
}
