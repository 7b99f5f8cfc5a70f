//! Company-page fetch layer.
//!
//! Owns the HTTP transport: builds the page URL for a symbol, performs the
//! GET, checks the status, and hands back a parsed [`Document`]. The core
//! never sees transport details; a failed fetch simply means there is no
//! document to analyze.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::document::Document;

/// Production page host
const SCREENER_BASE_URL: &str = "https://www.screener.in";

/// Per-request timeout
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Screener serves a reduced page to unknown agents, so present a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Errors from the fetch layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status (unknown symbol, throttle)
    #[error("HTTP {status} fetching data for {symbol}")]
    Status { symbol: String, status: u16 },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// HTTP client for Screener.in company pages.
pub struct ScreenerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScreenerClient {
    /// Create a client against the production host.
    pub fn new() -> Self {
        Self::with_base_url(SCREENER_BASE_URL)
    }

    /// Create a client against a custom host (tests point this at a mock
    /// server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch and parse the company page for a symbol.
    pub async fn fetch_company(&self, symbol: &str) -> Result<Document, FetchError> {
        let url = format!("{}/company/{}/", self.base_url, symbol);
        debug!(url = %url, symbol, "Fetching company page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(Document::parse(&body))
    }
}

impl Default for ScreenerClient {
    fn default() -> Self {
        Self::new()
    }
}
