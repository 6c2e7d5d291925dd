//! Pricewatch: marketplace product price tracking service
//!
//! Fetches a single Amazon.com / Amazon.in product page, extracts a handful
//! of fields via ordered fallback HTML selectors, and serves them as JSON,
//! featuring:
//! - Canonical product URL normalization (two recognized path shapes)
//! - Per-IP sliding-window rate limiting with temporary blocks
//! - TTL-on-read in-memory product caching
//! - Template-based product overviews (no real inference)
//! - An axum HTTP API (`POST /track-price`)

pub mod cache;
pub mod config;
pub mod describe;
pub mod error;
pub mod http;
pub mod limiter;
pub mod marketplace;
pub mod scraping;
pub mod tracker;
pub mod types;

pub use config::Config;
pub use error::TrackError;
pub use types::ProductRecord;
