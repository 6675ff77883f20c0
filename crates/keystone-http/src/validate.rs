use std::fmt;
use std::ops::Deref;

use axum::extract::{FromRequest, Request};
use keystone_fault::Fault;
use serde::de::DeserializeOwned;

use crate::body::{BodyLimit, collect_limited, read_json_body};

/// Self-check for request DTOs
///
/// The error's message is parsed into field errors, so it should read like
/// `email: is required; name: is too long`.
pub trait Validate {
    type Error: fmt::Display;

    /// # Errors
    ///
    /// Returns the reason the value is invalid
    fn validate(&self) -> Result<(), Self::Error>;
}

/// Extractor for a JSON body that decoded and passed [`Validate::validate`]
///
/// Rejects with a 400 fault when the body cannot be read or decoded, and a
/// 422 `"invalid body"` validation fault when validation fails. The body is
/// limited by the [`BodyLimit`] extension, or 1 MiB when none is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Valid<T>(pub T);

impl<T> Valid<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Valid<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Fault;

    async fn from_request(request: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let limit = request.extensions().get::<BodyLimit>().copied().unwrap_or_default();
        let bytes = collect_limited(request.into_body(), limit.0).await?;
        let value: T = read_json_body(&bytes)?;

        value
            .validate()
            .map_err(|err| Fault::validation("invalid body", &err))?;

        Ok(Self(value))
    }
}
