//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{CacheSettings, MemoryLimits, WriteMode};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory; each cache gets a subdirectory
    pub cache_dir: PathBuf,
    /// Response cache TTL in seconds
    pub response_ttl: u64,
    /// Image cache TTL in seconds
    pub image_ttl: u64,
    /// Maximum images resident in memory
    pub image_memory_count_limit: usize,
    /// Maximum image bytes resident in memory
    pub image_memory_byte_limit: u64,
    /// Periodic sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Cache root (default: platform cache dir + `hubcache`)
    /// - `RESPONSE_TTL` - Response TTL in seconds (default: 3600)
    /// - `IMAGE_TTL` - Image TTL in seconds (default: 86400)
    /// - `IMAGE_MEMORY_COUNT_LIMIT` - Images kept in memory (default: 100)
    /// - `IMAGE_MEMORY_BYTE_LIMIT` - Image bytes kept in memory (default: 50 MiB)
    /// - `SWEEP_INTERVAL` - Expired-entry sweep frequency in seconds (default: 600)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_dir: env::var_os("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            response_ttl: parse_var("RESPONSE_TTL").unwrap_or(defaults.response_ttl),
            image_ttl: parse_var("IMAGE_TTL").unwrap_or(defaults.image_ttl),
            image_memory_count_limit: parse_var("IMAGE_MEMORY_COUNT_LIMIT")
                .unwrap_or(defaults.image_memory_count_limit),
            image_memory_byte_limit: parse_var("IMAGE_MEMORY_BYTE_LIMIT")
                .unwrap_or(defaults.image_memory_byte_limit),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
        }
    }

    /// Settings for the JSON response cache: disk only, write-through.
    pub fn response_settings(&self) -> CacheSettings {
        CacheSettings {
            name: "responses".to_string(),
            directory: self.cache_dir.join("responses"),
            ttl: Duration::from_secs(self.response_ttl),
            memory: None,
            write_mode: WriteMode::Through,
        }
    }

    /// Settings for the image cache: memory plus disk, write-behind.
    pub fn image_settings(&self) -> CacheSettings {
        CacheSettings {
            name: "images".to_string(),
            directory: self.cache_dir.join("images"),
            ttl: Duration::from_secs(self.image_ttl),
            memory: Some(MemoryLimits {
                max_entries: self.image_memory_count_limit,
                max_bytes: self.image_memory_byte_limit,
            }),
            write_mode: WriteMode::Behind,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("hubcache")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            response_ttl: 3600,
            image_ttl: 86_400,
            image_memory_count_limit: 100,
            image_memory_byte_limit: 50 * 1024 * 1024,
            sweep_interval: 600,
        }
    }
}
