use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::config::HttpConfig;

/// Issues single GET requests with a fixed browser User-Agent.
///
/// The body is returned as text; callers parse it into a document once the
/// request has completed.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Requesting page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for URL: {url}"))?;
        debug!(bytes = body.len(), "Received page");
        Ok(body)
    }
}
