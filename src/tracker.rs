//! Request orchestration
//!
//! Wires validation, URL normalization, rate limiting, caching, fetching,
//! extraction, and overview synthesis into one request/response cycle.

use std::time::Instant;

use parking_lot::Mutex;
use url::Url;

use crate::cache::{CacheConfig, ProductCache};
use crate::describe;
use crate::error::{TrackError, TrackResult};
use crate::limiter::{AdmitDecision, RateLimitConfig, RateLimiter};
use crate::marketplace;
use crate::scraping::{extract_product, PageFetch};
use crate::types::ProductRecord;

/// What a caller asks to track: exactly one of `product_url` and
/// `product_id`, plus a ZIP/PIN code
#[derive(Debug, Clone, Default)]
pub struct TrackQuery {
    pub product_url: Option<String>,
    pub product_id: Option<String>,
    pub zip_code: Option<String>,
}

/// Orchestrates one tracking request end to end.
///
/// The limiter and cache are shared across all concurrent requests; each
/// sits behind its own mutex so per-key read-modify-write is atomic. The
/// locks are never held across the page fetch.
pub struct Tracker<F: PageFetch> {
    fetcher: F,
    limiter: Mutex<RateLimiter>,
    cache: Mutex<ProductCache>,
}

impl<F: PageFetch> Tracker<F> {
    /// Create a new tracker
    pub fn new(fetcher: F, rate_limit: RateLimitConfig, cache: CacheConfig) -> Self {
        Self {
            fetcher,
            limiter: Mutex::new(RateLimiter::new(rate_limit)),
            cache: Mutex::new(ProductCache::new(cache)),
        }
    }

    /// Track a product for `client_id` (best-effort IP).
    ///
    /// Validation and rate limiting reject before any network traffic. A
    /// cache hit is returned unchanged. Overview synthesis can never fail a
    /// request that made it through extraction.
    pub async fn track(&self, query: &TrackQuery, client_id: &str) -> TrackResult<ProductRecord> {
        let (canonical_url, zip_code) = validate_and_normalize(query)?;

        match self.limiter.lock().admit(client_id, Instant::now()) {
            AdmitDecision::Admitted => {}
            AdmitDecision::LimitExceeded => {
                return Err(TrackError::RateLimited(
                    "Rate limit exceeded. Please try again later.".to_string(),
                ));
            }
            AdmitDecision::Blocked => {
                return Err(TrackError::RateLimited(
                    "Too many requests. Your IP has been temporarily blocked.".to_string(),
                ));
            }
        }

        let cache_key = ProductCache::key(&canonical_url, &zip_code);
        let cached = self.cache.lock().get(&cache_key, Instant::now()).cloned();
        if let Some(record) = cached {
            tracing::info!(url = %canonical_url, "returning cached product data");
            return Ok(record);
        }

        let url = Url::parse(&canonical_url)
            .map_err(|e| TrackError::InvalidUrl(e.to_string()))?;
        tracing::info!(%url, "fetching product page");
        let html = self.fetcher.fetch_page(&url).await?;

        let mut record = extract_product(&html, &canonical_url, &zip_code)?;
        record.overview = Some(describe::synthesize(&record.name, &mut rand::thread_rng()));

        self.cache
            .lock()
            .put(cache_key, record.clone(), Instant::now());

        Ok(record)
    }
}

/// Check the query shape and produce the canonical URL and locale.
///
/// Exactly one of `product_url` and `product_id` must carry a value, and
/// the ZIP/PIN code must be 5 or 6 ASCII digits.
fn validate_and_normalize(query: &TrackQuery) -> TrackResult<(String, String)> {
    let product_url = query.product_url.as_deref().filter(|s| !s.is_empty());
    let product_id = query.product_id.as_deref().filter(|s| !s.is_empty());

    let zip_code = query
        .zip_code
        .as_deref()
        .filter(|z| is_valid_zip_code(z))
        .ok_or(TrackError::MissingLocale)?
        .to_string();

    let canonical_url = match (product_url, product_id) {
        (None, None) => {
            return Err(TrackError::InvalidRequestBody(
                "Either productUrl or productId is required".to_string(),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(TrackError::InvalidRequestBody(
                "Provide either productUrl or productId, not both".to_string(),
            ));
        }
        (None, Some(id)) => marketplace::url_for_product_id(id, &zip_code),
        (Some(url), None) => marketplace::normalize(url)?,
    };

    Ok((canonical_url, zip_code))
}

/// A locale is a 6-digit Indian PIN code or a 5-digit US ZIP code
fn is_valid_zip_code(zip: &str) -> bool {
    (zip.len() == 5 || zip.len() == 6) && zip.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PRODUCT_PAGE: &str = r#"
        <html><body>
            <span id="productTitle">Acme Gaming Laptop</span>
            <span class="a-price-whole">54,990</span>
        </body></html>
    "#;

    /// Serves fixture HTML and counts fetches
    struct FixtureFetcher {
        fetches: AtomicUsize,
        fail_with: Option<u16>,
    }

    impl FixtureFetcher {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail_with: Some(status),
            }
        }
    }

    #[async_trait]
    impl PageFetch for FixtureFetcher {
        async fn fetch_page(&self, _url: &Url) -> TrackResult<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(status) => Err(TrackError::FetchFailed { status }),
                None => Ok(PRODUCT_PAGE.to_string()),
            }
        }
    }

    fn tracker(fetcher: FixtureFetcher) -> Tracker<FixtureFetcher> {
        Tracker::new(fetcher, RateLimitConfig::default(), CacheConfig::default())
    }

    fn id_query(zip: &str) -> TrackQuery {
        TrackQuery {
            product_url: None,
            product_id: Some("B000000000".to_string()),
            zip_code: Some(zip.to_string()),
        }
    }

    #[tokio::test]
    async fn test_product_id_with_pin_code_uses_indian_marketplace() {
        let tracker = tracker(FixtureFetcher::new());
        let record = tracker.track(&id_query("201301"), "1.2.3.4").await.unwrap();
        assert_eq!(record.url, "https://www.amazon.in/dp/B000000000");
        assert_eq!(record.currency, "₹");
        assert_eq!(record.zip_code, "201301");
    }

    #[tokio::test]
    async fn test_product_id_with_zip_code_uses_us_marketplace() {
        let tracker = tracker(FixtureFetcher::new());
        let record = tracker.track(&id_query("90210"), "1.2.3.4").await.unwrap();
        assert_eq!(record.url, "https://www.amazon.com/dp/B000000000");
        assert_eq!(record.currency, "$");
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let tracker = tracker(FixtureFetcher::new());
        let first = tracker.track(&id_query("90210"), "1.2.3.4").await.unwrap();
        let second = tracker.track(&id_query("90210"), "1.2.3.4").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(tracker.fetcher.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_record_carries_an_overview() {
        let tracker = tracker(FixtureFetcher::new());
        let record = tracker.track(&id_query("90210"), "1.2.3.4").await.unwrap();
        let overview = record.overview.unwrap();
        assert!(overview.contains("Acme Gaming Laptop") || overview.contains("laptop"));
    }

    #[tokio::test]
    async fn test_eleventh_request_is_rate_limited() {
        let tracker = tracker(FixtureFetcher::new());
        // Distinct zip codes defeat the cache so every request counts
        for i in 0..10 {
            let zip = format!("100{:02}", i);
            tracker.track(&id_query(&zip), "1.2.3.4").await.unwrap();
        }
        let err = tracker
            .track(&id_query("99999"), "1.2.3.4")
            .await
            .unwrap_err();
        assert!(matches!(err, TrackError::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_rejects_query_with_neither_url_nor_id() {
        let tracker = tracker(FixtureFetcher::new());
        let query = TrackQuery {
            zip_code: Some("90210".to_string()),
            ..Default::default()
        };
        let err = tracker.track(&query, "1.2.3.4").await.unwrap_err();
        assert!(matches!(err, TrackError::InvalidRequestBody(_)));
    }

    #[tokio::test]
    async fn test_rejects_query_with_both_url_and_id() {
        let tracker = tracker(FixtureFetcher::new());
        let query = TrackQuery {
            product_url: Some("https://www.amazon.com/dp/B000000000".to_string()),
            product_id: Some("B000000000".to_string()),
            zip_code: Some("90210".to_string()),
        };
        let err = tracker.track(&query, "1.2.3.4").await.unwrap_err();
        assert!(matches!(err, TrackError::InvalidRequestBody(_)));
    }

    #[tokio::test]
    async fn test_rejects_malformed_zip_before_any_fetch() {
        let tracker = tracker(FixtureFetcher::new());
        let err = tracker.track(&id_query("90"), "1.2.3.4").await.unwrap_err();
        assert!(matches!(err, TrackError::MissingLocale));
        assert_eq!(tracker.fetcher.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_with_status() {
        let tracker = tracker(FixtureFetcher::failing(503));
        let err = tracker.track(&id_query("90210"), "1.2.3.4").await.unwrap_err();
        assert!(matches!(err, TrackError::FetchFailed { status: 503 }));
    }

    #[test]
    fn test_zip_code_shape() {
        assert!(is_valid_zip_code("90210"));
        assert!(is_valid_zip_code("201301"));
        assert!(!is_valid_zip_code("9021"));
        assert!(!is_valid_zip_code("9021011"));
        assert!(!is_valid_zip_code("90a10"));
    }
}
