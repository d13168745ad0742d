use std::sync::Arc;

use crate::kv::ConfiguredDatasetStore;
use crate::settings::Settings;

/// Application state structure for the web server
#[derive(Debug, Clone)]
pub struct AppState {
    /// Settings shared read-only by every request
    pub settings: Arc<Settings>,

    /// Where WARP accounts are fetched from
    pub dataset_store: ConfiguredDatasetStore,
}

impl AppState {
    /// Create a new AppState, picking the dataset store from settings
    pub fn new(settings: Settings) -> Self {
        let dataset_store = ConfiguredDatasetStore::from_location(&settings.dataset_path);
        Self {
            settings: Arc::new(settings),
            dataset_store,
        }
    }

    pub fn with_dataset_store(settings: Settings, dataset_store: ConfiguredDatasetStore) -> Self {
        Self {
            settings: Arc::new(settings),
            dataset_store,
        }
    }
}
