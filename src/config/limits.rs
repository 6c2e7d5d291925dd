//! Rate limit and cache configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CacheConfig;
use crate::limiter::RateLimitConfig;

/// Rate limiter settings as they appear in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Counting window length (seconds)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Requests admitted per window before blocking
    #[serde(default = "default_max_requests")]
    pub max_requests_per_window: u32,
    /// Block duration for offending clients (seconds)
    #[serde(default = "default_block_secs")]
    pub block_duration_secs: u64,
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    10
}

fn default_block_secs() -> u64 {
    10 * 60
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests_per_window: default_max_requests(),
            block_duration_secs: default_block_secs(),
        }
    }
}

impl From<&RateLimitSettings> for RateLimitConfig {
    fn from(settings: &RateLimitSettings) -> Self {
        Self {
            window: Duration::from_secs(settings.window_secs),
            max_requests_per_window: settings.max_requests_per_window,
            block_duration: Duration::from_secs(settings.block_duration_secs),
        }
    }
}

/// Product cache settings as they appear in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Entry time-to-live (seconds)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    30 * 60
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            ttl: Duration::from_secs(settings.ttl_secs),
        }
    }
}
