//! HTTP helpers for axum services
//!
//! Error rendering ([`write_error`], [`ApiError`]), JSON writers, validated
//! JSON bodies ([`Valid`]), query readers, client address detection and
//! per-request loggers.
#![allow(clippy::must_use_candidate)]

pub mod body;
mod client_ip;
mod error;
pub mod logger;
pub mod query;
mod response;
mod validate;

pub use body::{BodyError, BodyLimit, DEFAULT_MAX_BODY_BYTES, read_json_body};
pub use client_ip::{ClientIp, client_ip};
pub use error::{ApiError, UNEXPECTED_ERROR_MESSAGE, write_error};
pub use logger::{RequestLogger, with_logger};
pub use query::*;
pub use response::{write_json, write_success};
pub use validate::{Valid, Validate};
