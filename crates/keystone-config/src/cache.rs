use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Cache-aside configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Storage backend
    #[serde(default)]
    pub storage: CacheStorage,
    /// TTL applied when callers do not pass one, e.g. `"5m"` or `"30s"`
    #[serde(default = "default_ttl")]
    pub default_ttl: String,
    /// Prefix prepended to every key as `prefix:key`
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            storage: CacheStorage::default(),
            default_ttl: default_ttl(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Parsed [`CacheConfig::default_ttl`]
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string cannot be parsed
    pub fn default_ttl(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.default_ttl)
            .map_err(|e| anyhow::anyhow!("invalid cache.default_ttl '{}': {e}", self.default_ttl))
    }
}

/// Cache storage backend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CacheStorage {
    /// In-process storage (single instance only)
    #[default]
    Memory,
    /// Redis-compatible server (Redis, Valkey)
    Redis(RedisConfig),
}

/// Redis connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedisConfig {
    /// Connection URL, `redis://` or `rediss://`
    pub url: Url,
}

fn default_ttl() -> String {
    "5m".to_owned()
}
