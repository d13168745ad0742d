//! Account dataset storage
//!
//! WARP documents need two registered accounts. They live outside the
//! settings file, in a JSON dataset reachable through a [`DatasetStore`].

mod file_store;
mod http_store;

use std::future::Future;

use log::debug;
use thiserror::Error;

use crate::models::{Dataset, WarpAccount};

pub use file_store::FileDatasetStore;
pub use http_store::HttpDatasetStore;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Dataset is incomplete: {0}")]
    Incomplete(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub trait DatasetStore {
    fn fetch_dataset(&self) -> impl Future<Output = Result<Dataset, DatasetError>>;
}

/// Dataset held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetStore {
    dataset: Dataset,
}

impl MemoryDatasetStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetStore for MemoryDatasetStore {
    async fn fetch_dataset(&self) -> Result<Dataset, DatasetError> {
        Ok(self.dataset.clone())
    }
}

/// Store chosen from the configured dataset location
#[derive(Debug, Clone)]
pub enum ConfiguredDatasetStore {
    File(FileDatasetStore),
    Http(HttpDatasetStore),
    Memory(MemoryDatasetStore),
}

impl ConfiguredDatasetStore {
    /// URLs are fetched over HTTP, anything else is read as a file path.
    /// An empty location yields an empty in-memory dataset.
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.is_empty() {
            ConfiguredDatasetStore::Memory(MemoryDatasetStore::default())
        } else if location.starts_with("http://") || location.starts_with("https://") {
            ConfiguredDatasetStore::Http(HttpDatasetStore::new(location))
        } else {
            ConfiguredDatasetStore::File(FileDatasetStore::new(location))
        }
    }
}

impl DatasetStore for ConfiguredDatasetStore {
    async fn fetch_dataset(&self) -> Result<Dataset, DatasetError> {
        match self {
            ConfiguredDatasetStore::File(store) => store.fetch_dataset().await,
            ConfiguredDatasetStore::Http(store) => store.fetch_dataset().await,
            ConfiguredDatasetStore::Memory(store) => store.fetch_dataset().await,
        }
    }
}

/// Parse dataset JSON
pub fn parse_dataset(content: &str) -> Result<Dataset, DatasetError> {
    let dataset: Dataset = serde_json::from_str(content)?;
    debug!("Parsed dataset with {} warp accounts", dataset.warp_accounts.len());
    Ok(dataset)
}

/// The primary and relay accounts
///
/// Fails when fewer than two accounts are present or either account has a
/// blank credential.
pub fn warp_account_pair(
    dataset: &Dataset,
) -> Result<(&WarpAccount, &WarpAccount), DatasetError> {
    let (primary, relay) = match dataset.warp_accounts.as_slice() {
        [primary, relay, ..] => (primary, relay),
        accounts => {
            return Err(DatasetError::Incomplete(format!(
                "expected 2 warp accounts, found {}",
                accounts.len()
            )))
        }
    };

    for (index, account) in [primary, relay].into_iter().enumerate() {
        if let Some(field) = account.missing_credential() {
            return Err(DatasetError::Incomplete(format!(
                "warp account {} has no {}",
                index + 1,
                field
            )));
        }
    }
    Ok((primary, relay))
}
