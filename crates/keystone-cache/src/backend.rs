//! Key-value stores the cache-aside accessor reads from and writes to

mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;
use crate::error::CacheError;

/// Storage for JSON-encoded cache entries
///
/// Values are opaque strings. A zero TTL means the entry never expires.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch the value stored under `key`, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove every key in `keys`; missing keys are ignored
    async fn delete(&self, keys: &[&str]) -> Result<(), CacheError>;
}
