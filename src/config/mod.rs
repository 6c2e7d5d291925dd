//! Configuration for Pricewatch

mod limits;
mod logging;
mod server;

pub use limits::{CacheSettings, RateLimitSettings};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use server::ServerConfig;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scraping::FetchConfig;

/// Main configuration for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Rate limiter configuration
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    /// Product cache configuration
    #[serde(default)]
    pub cache: CacheSettings,
    /// Outbound page fetch configuration
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together so the user
    /// can fix everything in one pass rather than playing whack-a-mole.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Rate limit validation
        if self.rate_limit.window_secs == 0 {
            errors.push("rate_limit window_secs must be positive".to_string());
        }
        if self.rate_limit.max_requests_per_window == 0 {
            errors.push("max_requests_per_window must be positive".to_string());
        }
        if self.rate_limit.block_duration_secs == 0 {
            errors.push("block_duration_secs must be positive".to_string());
        }

        // Cache validation
        if self.cache.ttl_secs == 0 {
            errors.push("cache ttl_secs must be positive".to_string());
        }

        // Fetch validation
        if self.fetch.timeout_secs == 0 {
            errors.push("fetch timeout_secs must be positive".to_string());
        }
        if self.fetch.user_agent.is_empty() {
            errors.push("fetch user_agent must not be empty".to_string());
        }

        // Server validation
        if let Some(port_str) = self.server.listen_addr.rsplit(':').next() {
            if let Ok(port) = port_str.parse::<u32>() {
                if port == 0 || port > 65535 {
                    errors.push(format!(
                        "listen port must be between 1 and 65535, got {}",
                        port
                    ));
                }
            } else {
                errors.push(format!(
                    "listen_addr '{}' does not end in a port",
                    self.server.listen_addr
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
