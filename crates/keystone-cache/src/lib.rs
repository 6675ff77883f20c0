//! Cache-aside access to a key-value store
//!
//! [`Cache::get_or_set`] returns a cached value when one exists and otherwise
//! runs a producer, stores its result best-effort and returns it:
//!
//! ```
//! # async fn run() -> Result<(), keystone_fault::Fault> {
//! use std::time::Duration;
//!
//! use keystone_cache::{Cache, MemoryBackend};
//! use keystone_telemetry::Logger;
//!
//! let cache = Cache::new(MemoryBackend::new(), Logger::disabled());
//! let total: u64 = cache
//!     .get_or_set("orders:total", Duration::from_secs(60), || async { Ok::<_, keystone_fault::Fault>(42) })
//!     .await?;
//! assert_eq!(total, 42);
//! # Ok(())
//! # }
//! ```
#![allow(clippy::must_use_candidate)]

pub mod backend;
mod cache;
mod error;

pub use backend::{CacheBackend, MemoryBackend, RedisBackend};
pub use cache::{CANCELLED, Cache};
pub use error::CacheError;
