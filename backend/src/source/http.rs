//! Snapshot source for the factory-data HTTP endpoint.

use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;

use super::{FetchedSnapshot, SnapshotSource, SourceError, SourceResult, FACTORY_DATA_PATH};

/// Fetches the snapshot with a single `GET {base_url}/api/factory-data`.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    /// Build a source for `base_url` with a whole-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> SourceResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(SourceError::ConfigurationError(
                "HTTP source requires a base URL".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SourceError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: format!("{}{}", base, FACTORY_DATA_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshot(&self) -> SourceResult<FetchedSnapshot> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::TransportError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::StatusError {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::TransportError(e.to_string()))?;
        let fetched = FetchedSnapshot::from_body(&body)?;

        info!(
            "Fetched snapshot from {} ({} bytes, checksum {})",
            self.url,
            body.len(),
            fetched.checksum
        );
        Ok(fetched)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
