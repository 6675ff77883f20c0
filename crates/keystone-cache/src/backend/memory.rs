use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::CacheBackend;
use crate::error::CacheError;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// In-process cache storage
///
/// Suitable for tests and single-instance deployments. Expired entries are
/// removed lazily when read.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();

        // The read guard must be released before removing the key
        let found = self
            .entries
            .get(key)
            .map(|entry| (entry.is_live(now), entry.value.clone()));

        match found {
            Some((true, value)) => Ok(Some(value)),
            Some((false, _)) => {
                self.entries.remove_if(key, |_, entry| !entry.is_live(now));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Some(
                Instant::now()
                    .checked_add(ttl)
                    .ok_or_else(|| CacheError::Backend(format!("ttl out of range: {ttl:?}")))?,
            )
        };

        self.entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), CacheError> {
        for key in keys {
            self.entries.remove(*key);
        }

        Ok(())
    }
}
