use std::path::PathBuf;

use log::debug;

use super::{parse_dataset, DatasetError, DatasetStore};
use crate::models::Dataset;

/// Dataset read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileDatasetStore {
    path: PathBuf,
}

impl FileDatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetStore for FileDatasetStore {
    async fn fetch_dataset(&self) -> Result<Dataset, DatasetError> {
        debug!("Reading dataset from {}", self.path.display());
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DatasetError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        parse_dataset(&content)
    }
}
