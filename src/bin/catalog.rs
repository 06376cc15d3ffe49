//! Small CLI that exercises the store against a running catalog
//! service: load config from the environment, refresh, and print the
//! summary plus the first page.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use astro_catalog_client::config::ClientConfig;
use astro_catalog_client::store::CatalogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClientConfig::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(base_url = %config.base_url, "connecting to catalog service");

    let store = CatalogStore::from_config(&config).context("failed to build catalog store")?;

    if !store.health().await.unwrap_or(false) {
        tracing::warn!("service health check did not pass");
    }

    store
        .refresh()
        .await
        .context("failed to refresh catalog listing")?;

    if let Some(stats) = store.stats() {
        tracing::info!(
            count = stats.count,
            magnitude_min = ?stats.magnitude_min,
            magnitude_max = ?stats.magnitude_max,
            "catalog summary"
        );
        if let Some(brightest) = stats.brightest_object {
            tracing::info!(name = %brightest.name, magnitude = brightest.magnitude, "brightest object");
        }
    }

    let filters = store.filters();
    tracing::info!(
        page = filters.page,
        pages = store.pages(),
        total = store.total(),
        "listing page"
    );
    for object in store.objects() {
        println!(
            "{:>6}  {:<20} {:<14} mag {:>6.2}  {:>9.1} ly  {}",
            object.id,
            object.name,
            object.constellation,
            object.magnitude,
            object.distance_ly,
            object.spectral_type
        );
    }

    Ok(())
}
