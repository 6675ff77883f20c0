use std::path::Path;

use crate::{CacheStorage, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Same as [`Config::load`] for TOML already in memory
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the cache settings or HTTP limits are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_cache_config()?;
        self.validate_http_config()?;
        Ok(())
    }

    fn validate_cache_config(&self) -> anyhow::Result<()> {
        let Some(cache) = &self.cache else {
            return Ok(());
        };

        cache.default_ttl()?;

        if let CacheStorage::Redis(redis) = &cache.storage {
            let scheme = redis.url.scheme();
            if scheme != "redis" && scheme != "rediss" {
                anyhow::bail!("cache.storage.url must use the redis:// or rediss:// scheme, got '{scheme}://'");
            }
        }

        Ok(())
    }

    fn validate_http_config(&self) -> anyhow::Result<()> {
        if self.http.max_body_bytes == 0 {
            anyhow::bail!("http.max_body_bytes must be greater than zero");
        }

        Ok(())
    }
}
