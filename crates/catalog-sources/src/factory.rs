//! Builds the catalog source and watch-state store selected by configuration.

use anyhow::{Context, Result};
use catalog_config::{Config, PathManager, StoreBackend};
use std::sync::Arc;
use tracing::info;
use crate::local::LocalStore;
use crate::rest::RestStore;
use crate::tmdb::TmdbClient;
use crate::traits::{CatalogSource, WatchStateStore};

pub fn create_catalog(config: &Config) -> Result<Arc<dyn CatalogSource>> {
    if !config.is_catalog_configured() {
        anyhow::bail!("catalog.api_key is not configured; run `marquee config init --api-key <KEY>`");
    }
    let client = TmdbClient::from_config(&config.catalog);
    info!(base_url = %config.catalog.base_url, language = %config.catalog.language, "Catalog source ready");
    Ok(Arc::new(client))
}

pub fn create_store(config: &Config, paths: &PathManager) -> Result<Arc<dyn WatchStateStore>> {
    match config.store.backend {
        StoreBackend::Local => {
            let file = config
                .store
                .file
                .clone()
                .unwrap_or_else(|| paths.watch_state_file());
            let store = LocalStore::open(&file)
                .with_context(|| format!("Failed to open watch-state file {}", file.display()))?;
            info!(file = %file.display(), "Using local watch-state store");
            Ok(Arc::new(store))
        }
        StoreBackend::Rest => {
            let store = RestStore::from_config(&config.store)?;
            info!("Using REST watch-state store");
            Ok(Arc::new(store))
        }
    }
}
