use std::sync::Arc;

use crate::accounts::AccountStore;
use crate::catalog::{sample_listings, CatalogStore};
use crate::config::AppConfig;
use crate::storage::{KeyValueStore, MemoryStore, SledStore};

/// The two stores plus their shared storage, built once per process and
/// passed by reference to whatever layer needs them.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: AccountStore,
    pub catalog: CatalogStore,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Arc::new(AppConfig::from_env()?);
        let store: Arc<dyn KeyValueStore> = Arc::new(SledStore::open(&config.data_path)?);
        let state = Self::from_parts(config, store);

        if state.config.seed_sample_listings {
            if let Err(e) = state.catalog.seed_if_empty(sample_listings()) {
                tracing::warn!(error = %e, "sample listing seed failed; continuing");
            }
        }

        Ok(state)
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config,
            accounts: AccountStore::new(Arc::clone(&store)),
            catalog: CatalogStore::new(store),
        }
    }

    /// State over an in-memory store, for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            data_path: "unused".into(),
            seed_sample_listings: false,
        });
        Self::from_parts(config, Arc::new(MemoryStore::new()))
    }
}
