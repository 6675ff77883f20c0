use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;

use super::CacheBackend;
use crate::error::CacheError;

/// Cache storage on a Redis-compatible server (Redis, Valkey)
///
/// The connection is established on first use and shared by every clone of
/// the underlying [`ConnectionManager`], which reconnects on its own.
pub struct RedisBackend {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
    key_prefix: Option<String>,
}

impl RedisBackend {
    /// Create a backend without connecting
    ///
    /// Keys are stored as `prefix:key` when a prefix is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(url: &str, key_prefix: Option<String>) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Backend(format!("invalid URL: {e}")))?;

        Ok(Self {
            client,
            conn: OnceCell::new(),
            key_prefix: key_prefix.filter(|prefix| !prefix.is_empty()),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        self.conn
            .get_or_try_init(|| async {
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| CacheError::Backend(format!("connection failed: {e}")))
            })
            .await
            .cloned()
    }

    fn key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{prefix}:{key}"),
            None => key.to_owned(),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;

        conn.get(self.key(key))
            .await
            .map_err(|e| CacheError::Backend(format!("GET failed: {e}")))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let key = self.key(key);

        if ttl.is_zero() {
            return conn
                .set(&key, value)
                .await
                .map_err(|e| CacheError::Backend(format!("SET failed: {e}")));
        }

        // PX rejects 0, so sub-millisecond TTLs round up
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        conn.pset_ex(&key, value, ttl_ms)
            .await
            .map_err(|e| CacheError::Backend(format!("SET PX failed: {e}")))
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), CacheError> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.connection().await?;
        let keys: Vec<String> = keys.iter().map(|key| self.key(key)).collect();

        conn.del(keys)
            .await
            .map_err(|e| CacheError::Backend(format!("DEL failed: {e}")))
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("connected", &self.conn.initialized())
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
