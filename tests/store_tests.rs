//! Integration tests for the catalog store's action contract.

use std::fs;
use std::sync::Arc;

use astro_catalog_client::settings::{SettingsStore, DEFAULT_MAX_RECORDS};
use astro_catalog_client::store::{
    CatalogStore, FetchPhase, FilterPatch, FilterSet, DEFAULT_PAGE_SIZE,
};

mod support;

use support::TestBackend;

fn store_with_backend(backend: Arc<TestBackend>) -> (CatalogStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = SettingsStore::new(dir.path().join("settings.json"));
    (CatalogStore::new(backend, settings), dir)
}

#[tokio::test]
async fn refresh_overwrites_pagination_with_server_echo() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend);

    // Request a page far beyond the end; the backend clamps it.
    store.set_filters(FilterPatch::new().with_page(999).with_page_size(3));
    store.refresh().await.unwrap();

    let filters = store.filters();
    assert_eq!(store.total(), 10);
    assert_eq!(store.pages(), 4);
    assert_eq!(filters.page, 4);
    assert_eq!(filters.page_size, 3);
    // last page of 10 objects at size 3 has a single object
    assert_eq!(store.objects().len(), 1);
}

#[tokio::test]
async fn refresh_clamps_oversized_page_size() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend);

    store.set_filters(FilterPatch::new().with_page_size(500));
    store.refresh().await.unwrap();

    assert_eq!(store.filters().page_size, 100);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_data() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend.clone());

    store.refresh().await.unwrap();
    let objects_before = store.objects();
    let stats_before = store.stats();
    assert_eq!(objects_before.len(), 10);

    backend.fail_objects(true);
    let err = store.refresh().await.unwrap_err();
    assert!(err.to_string().contains("connection refused"));

    assert!(!store.is_loading());
    match store.phase() {
        FetchPhase::Failed(message) => assert!(!message.is_empty()),
        phase => panic!("expected failed phase, got {phase:?}"),
    }
    assert_eq!(store.objects(), objects_before);
    assert_eq!(store.stats(), stats_before);

    // Either request failing fails the pair.
    backend.fail_objects(false);
    backend.fail_stats(true);
    assert!(store.refresh().await.is_err());
    assert_eq!(store.objects(), objects_before);
}

#[tokio::test]
async fn successful_refresh_clears_previous_error() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend.clone());

    backend.fail_stats(true);
    assert!(store.refresh().await.is_err());
    assert!(store.error().is_some());

    backend.fail_stats(false);
    store.refresh().await.unwrap();
    assert_eq!(store.phase(), FetchPhase::Idle);
    assert!(store.error().is_none());
}

#[tokio::test]
async fn reset_filters_restores_defaults_and_refreshes_once() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend.clone());

    store.set_filters(
        FilterPatch::new()
            .with_constellation("Orion")
            .with_magnitude_max(0.5)
            .with_page(2)
            .with_page_size(3),
    );
    store.refresh().await.unwrap();
    let calls_before = backend.objects_call_count();

    store.reset_filters().await.unwrap();

    assert_eq!(store.filters(), FilterSet::default());
    assert_eq!(store.filters().page, 1);
    assert_eq!(store.filters().page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(backend.objects_call_count(), calls_before + 1);
    assert_eq!(store.objects().len(), 10);
}

#[tokio::test]
async fn update_max_records_failure_changes_nothing() {
    let backend = TestBackend::new();
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    let store = CatalogStore::new(backend.clone(), SettingsStore::new(settings_path.clone()));

    backend.fail_reload(true);
    let err = store.update_max_records(200).await.unwrap_err();

    assert!(err.to_string().contains("failed to update max records"));
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(store.max_records(), DEFAULT_MAX_RECORDS);
    assert!(!settings_path.exists());
    assert_eq!(backend.reload_call_count(), 1);
    assert_eq!(backend.objects_call_count(), 0);
}

#[tokio::test]
async fn update_max_records_success_persists_and_refreshes_once() {
    let backend = TestBackend::new();
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    let store = CatalogStore::new(backend.clone(), SettingsStore::new(settings_path.clone()));

    store.update_max_records(200).await.unwrap();

    assert_eq!(store.max_records(), 200);
    assert_eq!(
        fs::read_to_string(&settings_path).unwrap(),
        r#"{"maxRecords":200}"#
    );
    assert_eq!(backend.reload_call_count(), 1);
    assert_eq!(backend.objects_call_count(), 1);
    assert_eq!(store.phase(), FetchPhase::Idle);
}

#[tokio::test]
async fn update_max_records_truncates_working_dataset() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend);

    store.update_max_records(4).await.unwrap();

    assert_eq!(store.total(), 4);
    assert_eq!(store.stats().unwrap().count, 4);
}

#[tokio::test]
async fn failed_analysis_fetch_keeps_snapshot_and_phase() {
    let backend = TestBackend::new();
    let (store, _dir) = store_with_backend(backend.clone());

    store.fetch_magnitude_distribution(5).await.unwrap();
    store.fetch_spectral_breakdown().await.unwrap();
    let histogram_before = store.magnitude_distribution().unwrap();
    let breakdown_before = store.spectral_breakdown().unwrap();

    backend.fail_analysis(true);
    let err = store.fetch_magnitude_distribution(10).await.unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert!(store.fetch_spectral_breakdown().await.is_err());
    assert!(store.fetch_distance_distribution(10).await.is_err());
    assert!(store.fetch_correlation().await.is_err());

    // Cached snapshots survive; never-fetched ones stay unset.
    assert_eq!(store.magnitude_distribution().unwrap(), histogram_before);
    assert_eq!(store.spectral_breakdown().unwrap(), breakdown_before);
    assert!(store.distance_distribution().is_none());
    assert!(store.correlation().is_none());

    // The shared fetch phase never saw the failures.
    assert_eq!(store.phase(), FetchPhase::Idle);
    assert!(store.error().is_none());
}

#[tokio::test]
async fn corrupt_settings_fall_back_to_default() {
    let backend = TestBackend::new();
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "][ not json").unwrap();

    let store = CatalogStore::new(backend, SettingsStore::new(settings_path));
    assert_eq!(store.max_records(), DEFAULT_MAX_RECORDS);
}

#[tokio::test]
async fn superseded_refresh_does_not_overwrite_newer_result() {
    let backend = TestBackend::new();
    let dir = tempfile::tempdir().unwrap();
    let settings = SettingsStore::new(dir.path().join("settings.json"));
    let store = Arc::new(CatalogStore::new(backend.clone(), settings));

    // First refresh blocks inside fetch_objects until released.
    backend.gate_next_objects();
    let gated_store = store.clone();
    let gated = tokio::spawn(async move { gated_store.refresh().await });

    // Wait until the gated call is actually in flight.
    while backend.objects_call_count() == 0 {
        tokio::task::yield_now().await;
    }

    // A newer refresh with different filters completes first.
    store.set_filters(FilterPatch::new().with_constellation("Orion"));
    store.refresh().await.unwrap();
    assert_eq!(store.total(), 2);

    // Release the stale call; its response must be discarded.
    backend.release();
    gated.await.unwrap().unwrap();

    assert_eq!(store.total(), 2);
    assert_eq!(store.objects().len(), 2);
    assert_eq!(store.filters().constellation.as_deref(), Some("Orion"));
    assert_eq!(store.phase(), FetchPhase::Idle);
}
