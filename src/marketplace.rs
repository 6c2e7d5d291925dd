//! Marketplace URL normalization
//!
//! Reduces raw Amazon product URLs to a canonical form (scheme, host, and
//! the minimal product-identifying path, query stripped) and synthesizes
//! canonical URLs from bare product identifiers. Exactly two marketplace
//! hosts are supported; everything else is rejected.

use url::Url;

use crate::error::{TrackError, TrackResult};

/// Marketplace product identifiers are exactly this long
const PRODUCT_ID_LEN: usize = 10;

/// Check whether a host belongs to one of the two supported marketplaces
pub fn is_supported_host(host: &str) -> bool {
    host.contains("amazon.in") || host.contains("amazon.com")
}

/// Currency symbol for a canonical product URL.
///
/// Inferred solely from the hostname: the Indian marketplace prices in
/// rupees, everything else defaults to dollars. No locale-aware currency
/// table exists.
pub fn currency_for_url(url: &str) -> &'static str {
    if url.contains("amazon.in") {
        "₹"
    } else {
        "$"
    }
}

/// Synthesize a canonical URL from a bare product identifier.
///
/// The marketplace host is chosen by a locale heuristic: a 6-digit code is
/// an Indian PIN, anything else falls through to the US marketplace.
pub fn url_for_product_id(product_id: &str, zip_code: &str) -> String {
    if zip_code.len() == 6 {
        format!("https://www.amazon.in/dp/{}", product_id)
    } else {
        format!("https://www.amazon.com/dp/{}", product_id)
    }
}

/// Normalize a raw product URL to its canonical form.
///
/// Fails with [`TrackError::InvalidUrl`] on unparseable input and
/// [`TrackError::UnsupportedMarketplace`] for hosts outside the two allowed
/// marketplace domains. A well-formed URL on a supported host always
/// normalizes; unrecognized path shapes fall back to `scheme://host/path`
/// with the query stripped rather than erroring.
pub fn normalize(raw: &str) -> TrackResult<String> {
    let url = Url::parse(raw).map_err(|e| TrackError::InvalidUrl(e.to_string()))?;

    let host = url.host_str().unwrap_or_default();
    if !is_supported_host(host) {
        return Err(TrackError::UnsupportedMarketplace);
    }

    Ok(canonicalize(&url, raw))
}

/// Reduce a parsed marketplace URL to its canonical product form.
///
/// Product pages follow one of two recognized path shapes, tried in order:
/// 1. `/.../dp/<id>`
/// 2. `/.../gp/product/<id>`
///
/// Both collapse to just the identifying segments, dropping every other
/// path segment and all query parameters. When neither shape matches, the
/// URL is kept as `scheme://host/path` (best effort, query stripped). The
/// original string is the last resort for URLs without a proper host.
fn canonicalize(url: &Url, raw: &str) -> String {
    let scheme = url.scheme();
    let host = match url.host_str() {
        Some(h) => h,
        None => return raw.to_string(),
    };

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    for window in segments.windows(2) {
        if window[0] == "dp" && is_product_id(window[1]) {
            return format!("{}://{}/dp/{}", scheme, host, window[1]);
        }
    }

    for window in segments.windows(3) {
        if window[0] == "gp" && window[1] == "product" && is_product_id(window[2]) {
            return format!("{}://{}/gp/product/{}", scheme, host, window[2]);
        }
    }

    format!("{}://{}{}", scheme, host, url.path())
}

/// A product identifier is exactly ten uppercase-alphanumeric characters
fn is_product_id(segment: &str) -> bool {
    segment.len() == PRODUCT_ID_LEN
        && segment
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
