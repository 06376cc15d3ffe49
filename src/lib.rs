//! # Astro Catalog Client
//!
//! Client-side state layer for the astro catalog browsing UI. The crate
//! holds filter state, fetches paginated object listings and summary
//! statistics from the catalog service, and caches the analysis
//! snapshots (distributions, spectral breakdown, correlation) the
//! dashboard plots from.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: DTO types mirroring the service's response models
//! - [`backend`]: the [`CatalogBackend`](backend::CatalogBackend) trait
//!   with HTTP and in-memory implementations
//! - [`store`]: the [`CatalogStore`](store::CatalogStore) holding state
//!   and exposing the UI-facing actions
//! - [`settings`]: the persisted maximum-records preference
//! - [`config`]: environment-driven client configuration
//!
//! ## Example
//!
//! ```no_run
//! use astro_catalog_client::config::ClientConfig;
//! use astro_catalog_client::store::{CatalogStore, FilterPatch};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let store = CatalogStore::from_config(&config)?;
//!
//! store.refresh().await?;
//! store.set_filters(FilterPatch::new().with_constellation("Orion"));
//! store.refresh().await?;
//!
//! for object in store.objects() {
//!     println!("{} ({})", object.name, object.spectral_type);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod settings;
pub mod store;

pub use backend::{BackendError, BackendResult, CatalogBackend};
pub use store::{CatalogStore, FetchPhase, FilterPatch, FilterSet, StoreError};
