use forum_core::config::FetchConfig;
use forum_core::ports::PageFetcher;
use forum_core::{Result, ScrapeError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::debug;

/// Blocking HTTP implementation of the PageFetcher trait
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Builds a client with the configured user agent and timeout
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("de-DE,de;q=0.9"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ScrapeError::Fetch {
                url: config.url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let fetch_error = |reason: String| ScrapeError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| fetch_error(format!("failed to read response body: {e}")))?;
        debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
