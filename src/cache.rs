//! In-memory product cache
//!
//! Keyed by `canonical_url:zip_code`. Entries expire by TTL checked on
//! read; a stale entry is simply treated as a miss and left in place, so
//! reads are pure comparisons and never mutate the map. Key count grows
//! without bound over the process lifetime.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::ProductRecord;

/// A cached extraction result
#[derive(Debug, Clone)]
struct CacheEntry {
    record: ProductRecord,
    created_at: Instant,
}

/// Configuration for the product cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long an entry stays fresh
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

/// TTL-on-read product record store
pub struct ProductCache {
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
}

impl ProductCache {
    /// Create a new cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
        }
    }

    /// Build the cache key for a canonical URL and locale
    pub fn key(canonical_url: &str, zip_code: &str) -> String {
        format!("{}:{}", canonical_url, zip_code)
    }

    /// Look up a record, treating entries at or past the TTL as absent
    pub fn get(&self, key: &str, now: Instant) -> Option<&ProductRecord> {
        let entry = self.entries.get(key)?;
        if now.duration_since(entry.created_at) < self.config.ttl {
            Some(&entry.record)
        } else {
            None
        }
    }

    /// Store a record, unconditionally overwriting any existing entry
    pub fn put(&mut self, key: String, record: ProductRecord, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                record,
                created_at: now,
            },
        );
    }

    /// Total entries held, fresh and stale alike
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(name: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            price: "99.00".to_string(),
            currency: "$".to_string(),
            timestamp: Utc::now(),
            image_url: None,
            url: "https://www.amazon.com/dp/B000000000".to_string(),
            zip_code: "90210".to_string(),
            overview: None,
            description: None,
        }
    }

    #[test]
    fn test_hit_within_ttl_returns_identical_record() {
        let mut cache = ProductCache::new(CacheConfig::default());
        let now = Instant::now();
        let stored = record("Widget");

        cache.put("k".to_string(), stored.clone(), now);
        let hit = cache.get("k", now + Duration::from_secs(60)).unwrap();
        assert_eq!(*hit, stored);
    }

    #[test]
    fn test_stale_entry_is_a_miss_but_stays_resident() {
        let mut cache = ProductCache::new(CacheConfig::default());
        let now = Instant::now();

        cache.put("k".to_string(), record("Widget"), now);
        let later = now + Duration::from_secs(30 * 60);
        assert!(cache.get("k", later).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let mut cache = ProductCache::new(CacheConfig::default());
        let now = Instant::now();

        cache.put("k".to_string(), record("Old"), now);
        cache.put("k".to_string(), record("New"), now + Duration::from_secs(1));

        let hit = cache.get("k", now + Duration::from_secs(2)).unwrap();
        assert_eq!(hit.name, "New");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_combines_url_and_locale() {
        assert_eq!(
            ProductCache::key("https://www.amazon.com/dp/B000000000", "90210"),
            "https://www.amazon.com/dp/B000000000:90210"
        );
    }
}
