//! Service configuration loaded from TOML
//!
//! Values may reference environment variables with `{{ env.VAR }}` or
//! `{{ env.VAR | default("x") }}`; see [`expand_env`].
#![allow(clippy::must_use_candidate)]

pub mod cache;
mod env;
pub mod http;
mod loader;
pub mod logging;

use serde::Deserialize;

pub use cache::*;
pub use env::{ExpandError, expand_env};
pub use http::*;
pub use logging::*;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logger configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cache-aside configuration, absent when the service runs without a cache
    #[serde(default)]
    pub cache: Option<CacheConfig>,
    /// Request handling limits
    #[serde(default)]
    pub http: HttpConfig,
}
