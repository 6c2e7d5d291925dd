//! Product page fetcher
//!
//! Issues a single HTTP GET with a browser-like header set and no caching.
//! Marketplace pages are served differently to obvious bots, so the client
//! presents a desktop Chrome identity and a static search-engine referrer.
//! No retries: a failed fetch is terminal for the request.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{TrackError, TrackResult};

/// Desktop Chrome identity presented to the marketplace
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the page fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection timeout (seconds)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Maximum redirects to follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Fetches the body of a product page.
///
/// The seam exists so the request pipeline can be exercised against fixture
/// HTML without touching the network.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetch the HTML body at `url`
    async fn fetch_page(&self, url: &Url) -> TrackResult<String>;
}

/// HTTP page fetcher backed by reqwest
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a new fetcher
    pub fn new(config: &FetchConfig) -> TrackResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .brotli(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetch for PageFetcher {
    async fn fetch_page(&self, url: &Url) -> TrackResult<String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| match e.status() {
                Some(status) => TrackError::FetchFailed {
                    status: status.as_u16(),
                },
                None => TrackError::Internal(
                    anyhow::Error::new(e).context("Failed to fetch product page"),
                ),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "product page fetch failed");
            return Err(TrackError::FetchFailed {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| TrackError::Internal(
                anyhow::Error::new(e).context("Failed to read product page body"),
            ))
    }
}
