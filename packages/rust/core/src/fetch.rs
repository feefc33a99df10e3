//! Page fetching.
//!
//! The pipeline never touches an HTTP client directly; it is handed a
//! [`PageFetcher`], so tests can swap in canned pages and callers own the
//! client's lifetime and settings.

use std::future::Future;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use clipscrape_shared::{ClipScrapeError, FetchConfig, Result};

/// Fetches the raw HTML of a page.
pub trait PageFetcher: Send + Sync {
    /// Transport failures, timeouts, and non-2xx statuses are
    /// [`ClipScrapeError::Network`].
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}

/// [`PageFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and User-Agent.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClipScrapeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ClipScrapeError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipScrapeError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClipScrapeError::Network(format!("{url}: body read failed: {e}")))?;

        debug!(bytes = body.len(), "page fetched");
        Ok(body)
    }
}
