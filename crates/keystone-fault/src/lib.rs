//! Tagged errors for HTTP APIs
//!
//! A [`Fault`] carries an HTTP status, a message, a semantic [`Tag`] and
//! optional field-level validation details, and can wrap an underlying
//! cause. Lower layers wrap driver errors into faults; the HTTP layer only
//! inspects the first fault in an error chain (see [`find_fault`]).
//!
//! ```
//! use keystone_fault::{Fault, FaultBuilder, Tag, get_tag};
//!
//! let err = FaultBuilder::not_found("user not found")
//!     .cause(std::io::Error::other("no rows"))
//!     .build();
//!
//! assert_eq!(get_tag(Some(&err)), Tag::NOT_FOUND);
//! assert_eq!(err.to_string(), "NOT_FOUND: user not found (caused by: no rows)");
//! ```
#![allow(clippy::must_use_candidate)]

mod chain;
mod fault;
mod field;
#[cfg(feature = "axum")]
mod http;
mod tag;
pub mod wire;

pub use chain::{find_fault, get_tag};
pub use fault::{Cause, Fault, FaultBuilder};
pub use field::{FieldError, GENERAL_FIELD, parse_field_errors};
pub use tag::Tag;
