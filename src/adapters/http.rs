use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, ShrinkError};
use async_trait::async_trait;
use reqwest::Client;

/// Plain GET with the client's default settings. No retries and no explicit timeout.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching product page: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ShrinkError::network(url, e))?;

        let status = response.status();
        tracing::debug!("Response status for {}: {}", url, status);

        if !status.is_success() {
            return Err(ShrinkError::network(url, format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| ShrinkError::network(url, e))
    }
}
