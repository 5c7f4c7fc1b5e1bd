//! Configuration Module
//!
//! Loads cache sizing and server settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{
    DEFAULT_FILTER_WINDOW, DEFAULT_ID_CAPACITY, DEFAULT_SEARCH_CAPACITY, DEFAULT_SEARCH_TTL_SECS,
};

// == Cache Config ==
/// Sizing and freshness parameters shared by every entity cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum entries in the by-ID cache
    pub id_capacity: usize,
    /// Maximum entries in the search-result cache
    pub search_capacity: usize,
    /// Search entry time-to-live in seconds
    pub search_ttl_secs: u64,
    /// Rows over-fetched for date-window filter sorts
    pub filter_window: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            id_capacity: DEFAULT_ID_CAPACITY,
            search_capacity: DEFAULT_SEARCH_CAPACITY,
            search_ttl_secs: DEFAULT_SEARCH_TTL_SECS,
            filter_window: DEFAULT_FILTER_WINDOW,
        }
    }
}

impl CacheConfig {
    /// Search TTL in milliseconds.
    pub fn search_ttl_ms(&self) -> u64 {
        self.search_ttl_secs.saturating_mul(1000)
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache sizing applied to every entity cache
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ID_CACHE_CAPACITY` - By-ID cache capacity (default: 100)
    /// - `SEARCH_CACHE_CAPACITY` - Search cache capacity (default: 20)
    /// - `SEARCH_TTL_SECS` - Search entry TTL in seconds (default: 60)
    /// - `FILTER_WINDOW` - Over-fetch window for date filters (default: 2000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Expired search sweep frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache: CacheConfig {
                id_capacity: env_or("ID_CACHE_CAPACITY", defaults.cache.id_capacity),
                search_capacity: env_or("SEARCH_CACHE_CAPACITY", defaults.cache.search_capacity),
                search_ttl_secs: env_or("SEARCH_TTL_SECS", defaults.cache.search_ttl_secs),
                filter_window: env_or("FILTER_WINDOW", defaults.cache.filter_window),
            },
            server_port: env_or("SERVER_PORT", defaults.server_port),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            sweep_interval: 30,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.id_capacity, 100);
        assert_eq!(config.cache.search_capacity, 20);
        assert_eq!(config.cache.search_ttl_secs, 60);
        assert_eq!(config.cache.filter_window, 2000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 30);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("ID_CACHE_CAPACITY");
        env::remove_var("SEARCH_CACHE_CAPACITY");
        env::remove_var("SEARCH_TTL_SECS");
        env::remove_var("FILTER_WINDOW");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.cache, CacheConfig::default());
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 30);
    }

    #[test]
    fn test_search_ttl_ms() {
        let cache = CacheConfig {
            search_ttl_secs: 60,
            ..CacheConfig::default()
        };
        assert_eq!(cache.search_ttl_ms(), 60_000);
    }
}
