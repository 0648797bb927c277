use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::domain::dataset::Dataset;
use crate::domain::envelope::Envelope;
use crate::domain::error::FetchError;

/// GET `url` and unwrap its envelope into a dataset.
pub async fn fetch_dataset(url: &str) -> Result<Dataset, FetchError> {
    RemoteFetcher::new().fetch_dataset(url).await
}

/// HTTP client for the statistics API and static CSV resources.
///
/// Holds no per-call state; clones share the underlying connection pool.
/// Dropping a pending call abandons it without side effects. There is no
/// built-in timeout or retry.
#[derive(Debug, Clone, Default)]
pub struct RemoteFetcher {
    client: reqwest::Client,
}

impl RemoteFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn fetch_dataset(&self, url: &str) -> Result<Dataset, FetchError> {
        let body = self.get(url).await?.bytes().await.map_err(|e| {
            warn!(url, error = %e, "Failed to read response body");
            FetchError::Http(format!("Failed to read response body: {}", e))
        })?;

        let json: JsonValue = serde_json::from_slice(&body).map_err(|e| {
            warn!(url, error = %e, "Response body is not valid JSON");
            FetchError::Decode(e.to_string())
        })?;

        let dataset = Envelope::classify(json).into_dataset().map_err(|e| {
            warn!(url, error = %e, "Rejected response envelope");
            e
        })?;

        debug!(url, records = dataset.len(), "Fetched dataset");
        Ok(dataset)
    }

    /// GET a text resource such as a CSV file.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.get(url).await?.text().await.map_err(|e| {
            warn!(url, error = %e, "Failed to read response body");
            FetchError::Http(format!("Failed to read response body: {}", e))
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Request failed");
            FetchError::Http(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Non-success status");
            return Err(FetchError::Http(format!("status {}", status)));
        }

        Ok(response)
    }
}
