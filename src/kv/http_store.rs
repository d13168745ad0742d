use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};

use super::{parse_dataset, DatasetError, DatasetStore};
use crate::models::Dataset;

/// Default timeout for dataset requests in seconds
const DEFAULT_TIMEOUT: u64 = 15;

/// Dataset fetched over HTTP
#[derive(Debug, Clone)]
pub struct HttpDatasetStore {
    url: String,
    timeout: Duration,
}

impl HttpDatasetStore {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl DatasetStore for HttpDatasetStore {
    async fn fetch_dataset(&self) -> Result<Dataset, DatasetError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent("clashgen")
            .build()
            .map_err(|e| DatasetError::Network(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Fetching dataset from {}", self.url);
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DatasetError::Network(format!("Failed to send request: {}", e)))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(DatasetError::NotFound(self.url.clone())),
            status => {
                return Err(DatasetError::Network(format!(
                    "Unexpected status {} from {}",
                    status, self.url
                )))
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| DatasetError::Network(format!("Failed to read response body: {}", e)))?;
        parse_dataset(&body)
    }
}
