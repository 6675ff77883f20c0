use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use keystone_config::{CacheConfig, CacheStorage};
use keystone_fault::{Fault, FaultBuilder, Tag};
use keystone_telemetry::Logger;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::backend::{CacheBackend, MemoryBackend, RedisBackend};

/// Tag of the fault returned when a cache operation is cancelled
pub const CANCELLED: Tag = Tag::from_static("CANCELLED");

/// Cache-aside accessor over a [`CacheBackend`]
///
/// Values are stored as JSON. Cloning is cheap; clones share the backend.
///
/// There is no single-flight guarantee: two concurrent misses on the same key
/// both run their producer and both write.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    logger: Logger,
    default_ttl: Duration,
}

impl Cache {
    /// Accessor over `backend` logging through `logger`, with a five minute default TTL
    pub fn new(backend: impl CacheBackend + 'static, logger: Logger) -> Self {
        Self::from_backend(Arc::new(backend), logger)
    }

    pub fn from_backend(backend: Arc<dyn CacheBackend>, logger: Logger) -> Self {
        Self {
            backend,
            logger,
            default_ttl: Duration::from_secs(300),
        }
    }

    /// Build the accessor described by the `[cache]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the TTL does not parse or the Redis URL is rejected
    pub fn from_config(config: &CacheConfig, logger: Logger) -> anyhow::Result<Self> {
        let default_ttl = config.default_ttl()?;

        let backend: Arc<dyn CacheBackend> = match &config.storage {
            CacheStorage::Memory => Arc::new(MemoryBackend::new()),
            CacheStorage::Redis(redis) => Arc::new(
                RedisBackend::new(redis.url.as_str(), config.key_prefix.clone())
                    .map_err(|e| anyhow::anyhow!("failed to create redis cache backend: {e}"))?,
            ),
        };

        Ok(Self::from_backend(backend, logger).with_default_ttl(default_ttl))
    }

    /// Replace the logger receiving hit/miss debug events and write-failure warnings
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub const fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// TTL configured for callers without a more specific one
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Read and decode the value under `key`
    ///
    /// # Errors
    ///
    /// Returns a `NOT_FOUND` fault when the key is absent, or a `DATABASE`
    /// fault when the backend fails or the stored value does not decode as `T`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, Fault> {
        let raw = self.backend.get(key).await.map_err(|e| {
            FaultBuilder::internal_server_error("failed to read cache entry")
                .tag(Tag::DATABASE)
                .cause(e)
                .build()
        })?;

        let Some(raw) = raw else {
            return Err(Fault::not_found("cache entry not found"));
        };

        serde_json::from_str(&raw).map_err(|e| {
            FaultBuilder::internal_server_error("failed to decode cache entry")
                .tag(Tag::DATABASE)
                .cause(e)
                .build()
        })
    }

    /// Encode `value` and store it under `key`; a zero TTL never expires
    ///
    /// # Errors
    ///
    /// Returns a `DATABASE` fault when encoding or the backend write fails
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), Fault> {
        let raw = serde_json::to_string(value).map_err(|e| {
            FaultBuilder::internal_server_error("failed to encode cache entry")
                .tag(Tag::DATABASE)
                .cause(e)
                .build()
        })?;

        self.backend.set(key, &raw, ttl).await.map_err(|e| {
            FaultBuilder::internal_server_error("failed to write cache entry")
                .tag(Tag::DATABASE)
                .cause(e)
                .build()
        })
    }

    /// Remove `keys` from the cache
    ///
    /// # Errors
    ///
    /// Returns a `DATABASE` fault when the backend fails
    pub async fn delete(&self, keys: &[&str]) -> Result<(), Fault> {
        self.backend.delete(keys).await.map_err(|e| {
            FaultBuilder::internal_server_error("failed to delete cache entries")
                .tag(Tag::DATABASE)
                .cause(e)
                .build()
        })
    }

    /// Return the cached value for `key`, or produce, store and return it
    ///
    /// Any read failure (absent key, backend error, undecodable value) counts
    /// as a miss. A producer error is returned unchanged and nothing is
    /// written. A failed write is logged as a warning and the produced value
    /// is still returned.
    ///
    /// # Errors
    ///
    /// Returns the producer's error on a miss
    pub async fn get_or_set<T, E, F, Fut>(&self, key: &str, ttl: Duration, producer: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.lookup(key).await {
            return Ok(value);
        }

        let value = producer().await?;
        self.store(key, &value, ttl).await;
        Ok(value)
    }

    /// [`Cache::get_or_set`] that gives up when `cancel` fires
    ///
    /// The read and the producer race the token. Once the producer succeeds
    /// the write runs to completion.
    ///
    /// # Errors
    ///
    /// Returns the producer's error on a miss, or a [`CANCELLED`] fault
    /// (408) converted into `E` when the token fires first
    pub async fn get_or_set_until<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<Fault>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cached = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled(key).into()),
            cached = self.lookup(key) => cached,
        };

        if let Some(value) = cached {
            return Ok(value);
        }

        let value = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled(key).into()),
            produced = producer() => produced?,
        };

        self.store(key, &value, ttl).await;
        Ok(value)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get(key).await {
            Ok(value) => {
                self.logger.in_scope(|| tracing::debug!(key, "cache hit"));
                Some(value)
            }
            Err(fault) => {
                self.logger.in_scope(|| tracing::debug!(key, reason = %fault, "cache miss"));
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if let Err(fault) = self.set(key, value, ttl).await {
            self.logger
                .in_scope(|| tracing::warn!(key, error = %fault, "failed to store cache entry"));
        }
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("logger", &self.logger)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

fn cancelled(key: &str) -> Fault {
    Fault::builder(format!("cache operation for '{key}' was cancelled"))
        .http_code(http::StatusCode::REQUEST_TIMEOUT)
        .tag(CANCELLED)
        .build()
}
