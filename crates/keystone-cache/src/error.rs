use thiserror::Error;

/// Cache backend errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Connection or command failure
    #[error("cache backend: {0}")]
    Backend(String),
}
