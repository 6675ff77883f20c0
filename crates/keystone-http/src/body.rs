//! JSON request bodies

use axum::body::{Body, Bytes};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use keystone_config::HttpConfig;
use keystone_fault::{Fault, FaultBuilder};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

/// Largest body read when no [`BodyLimit`] is installed (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

/// Body size limit for [`crate::Valid`], installed as a request extension
///
/// ```
/// use axum::{Extension, Router};
/// use keystone_http::BodyLimit;
///
/// let app: Router = Router::new().layer(Extension(BodyLimit(64 * 1024)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        Self(DEFAULT_MAX_BODY_BYTES)
    }
}

impl From<&HttpConfig> for BodyLimit {
    fn from(config: &HttpConfig) -> Self {
        Self(config.max_body_bytes)
    }
}

/// Why a request body could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("request body cannot be empty")]
    Empty,
    #[error("request body contains badly-formed JSON (at line {line}, column {column})")]
    Syntax { line: usize, column: usize },
    /// A field holds a value of the wrong type
    #[error("request body contains incorrect JSON field type")]
    InvalidFieldType,
    /// The document itself is not an object
    #[error("request body contains incorrect JSON type (at line {line}, column {column})")]
    InvalidType { line: usize, column: usize },
    #[error("request body contains unknown field `{0}`")]
    UnknownField(String),
    #[error("request body is missing field `{0}`")]
    MissingField(String),
    #[error("request body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },
    #[error("request body must only contain a single JSON value")]
    TrailingData,
    #[error("request body could not be read: {0}")]
    Other(String),
}

impl BodyError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn from_json(err: &serde_json::Error, body: &[u8]) -> Self {
        let (line, column) = (err.line(), err.column());

        match err.classify() {
            Category::Syntax | Category::Eof => Self::Syntax { line, column },
            Category::Io => Self::Other(err.to_string()),
            Category::Data => {
                let message = err.to_string();
                if message.starts_with("unknown field") {
                    Self::UnknownField(backticked(&message))
                } else if message.starts_with("missing field") {
                    Self::MissingField(backticked(&message))
                } else if body.trim_ascii_start().first() == Some(&b'{') {
                    Self::InvalidFieldType
                } else {
                    Self::InvalidType { line, column }
                }
            }
        }
    }
}

/// First `` `quoted` `` name in a serde message
fn backticked(message: &str) -> String {
    message.split('`').nth(1).unwrap_or_default().to_owned()
}

impl From<BodyError> for Fault {
    fn from(err: BodyError) -> Self {
        let status = err.status();
        FaultBuilder::bad_request(err.to_string()).http_code(status).build()
    }
}

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        Fault::from(self).into_response()
    }
}

/// Decode a complete JSON body into `T`
///
/// Unknown fields are only reported when `T` uses
/// `#[serde(deny_unknown_fields)]`.
///
/// # Errors
///
/// Returns a [`BodyError`] describing why the body was rejected
pub fn read_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, BodyError> {
    if body.trim_ascii().is_empty() {
        return Err(BodyError::Empty);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = T::deserialize(&mut deserializer).map_err(|e| BodyError::from_json(&e, body))?;
    deserializer.end().map_err(|_| BodyError::TrailingData)?;

    Ok(value)
}

/// Collect at most `limit` bytes of `body`
pub(crate) async fn collect_limited(body: Body, limit: usize) -> Result<Bytes, BodyError> {
    Limited::new(body, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                BodyError::TooLarge { limit }
            } else {
                BodyError::Other(e.to_string())
            }
        })
}
