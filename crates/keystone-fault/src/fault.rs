use std::error::Error;
use std::fmt;

use http::StatusCode;

use crate::chain::find_fault;
use crate::field::{FieldError, parse_field_errors};
use crate::tag::Tag;

/// Boxed underlying error carried by a [`Fault`]
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Structured application error for HTTP APIs
///
/// Carries an HTTP status, a human-readable message, a [`Tag`] for
/// programmatic branching, optional field-level validation details and an
/// optional wrapped cause reachable through [`Error::source`].
///
/// A fault is immutable once built. Use [`Fault::builder`] or one of the
/// preset constructors:
///
/// ```
/// use http::StatusCode;
/// use keystone_fault::{Fault, Tag};
///
/// let fault = Fault::builder("payment failed")
///     .http_code(StatusCode::CONFLICT)
///     .tag(Tag::CONFLICT)
///     .build();
///
/// assert_eq!(fault.http_code(), StatusCode::CONFLICT);
/// assert_eq!(fault.to_string(), "CONFLICT: payment failed");
/// ```
#[derive(Debug)]
pub struct Fault {
    pub(crate) http_code: StatusCode,
    pub(crate) message: String,
    pub(crate) tag: Tag,
    pub(crate) field_errors: Vec<FieldError>,
    pub(crate) cause: Option<Cause>,
}

impl Fault {
    /// Fault with status 400, no tag, no fields and no cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            http_code: StatusCode::BAD_REQUEST,
            message: message.into(),
            tag: Tag::UNTAGGED,
            field_errors: Vec::new(),
            cause: None,
        }
    }

    /// Start building a fault from the defaults of [`Fault::new`]
    pub fn builder(message: impl Into<String>) -> FaultBuilder {
        FaultBuilder { fault: Self::new(message) }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        FaultBuilder::bad_request(message).build()
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        FaultBuilder::not_found(message).build()
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        FaultBuilder::internal_server_error(message).build()
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        FaultBuilder::unauthorized(message).build()
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        FaultBuilder::forbidden(message).build()
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        FaultBuilder::conflict(message).build()
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        FaultBuilder::too_many_requests(message).build()
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        FaultBuilder::unprocessable_entity(message).build()
    }

    /// Validation fault (422) whose fields are parsed from `err`'s message
    ///
    /// See [`parse_field_errors`] for the accepted format.
    pub fn validation(message: impl Into<String>, err: &impl fmt::Display) -> Self {
        FaultBuilder::validation(message, err).build()
    }

    /// Validation fault (422) with explicit field errors
    pub fn validation_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        FaultBuilder::validation_fields(message, fields).build()
    }

    pub const fn http_code(&self) -> StatusCode {
        self.http_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Whether the first fault in `target`'s chain has the same tag
    ///
    /// The chain is walked like [`find_fault`], so a wrapped fault counts.
    /// Two faults with different tags never match, even though both are
    /// faults. To ask "is this any fault at all", use [`find_fault`] instead.
    pub fn is(&self, target: &(dyn Error + 'static)) -> bool {
        find_fault(target).is_some_and(|other| other.tag == self.tag)
    }

    /// Whether this fault carries the given tag
    pub fn has_tag(&self, tag: &Tag) -> bool {
        &self.tag == tag
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {} (caused by: {cause})", self.tag, self.message),
            None => write!(f, "{}: {}", self.tag, self.message),
        }
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Fluent builder for [`Fault`]
///
/// Setters apply in call order, so a later call overrides an earlier one.
#[derive(Debug)]
#[must_use]
pub struct FaultBuilder {
    fault: Fault,
}

impl FaultBuilder {
    fn preset(message: impl Into<String>, http_code: StatusCode, tag: Tag) -> Self {
        Fault::builder(message).http_code(http_code).tag(tag)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::BAD_REQUEST, Tag::BAD_REQUEST)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::NOT_FOUND, Tag::NOT_FOUND)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::INTERNAL_SERVER_ERROR, Tag::INTERNAL_SERVER_ERROR)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::UNAUTHORIZED, Tag::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::FORBIDDEN, Tag::FORBIDDEN)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::CONFLICT, Tag::CONFLICT)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::TOO_MANY_REQUESTS, Tag::TOO_MANY_REQUESTS)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::preset(message, StatusCode::UNPROCESSABLE_ENTITY, Tag::UNPROCESSABLE_ENTITY)
    }

    pub fn validation(message: impl Into<String>, err: &impl fmt::Display) -> Self {
        Self::preset(message, StatusCode::UNPROCESSABLE_ENTITY, Tag::VALIDATION_ERROR).validation_error(err)
    }

    pub fn validation_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::preset(message, StatusCode::UNPROCESSABLE_ENTITY, Tag::VALIDATION_ERROR).field_errors(fields)
    }

    pub fn http_code(mut self, http_code: StatusCode) -> Self {
        self.fault.http_code = http_code;
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.fault.tag = tag;
        self
    }

    /// Wrap an underlying error
    pub fn cause(mut self, cause: impl Into<Cause>) -> Self {
        self.fault.cause = Some(cause.into());
        self
    }

    /// Wrap an underlying error when one is present; `None` keeps the current cause
    pub fn maybe_cause(self, cause: Option<impl Into<Cause>>) -> Self {
        match cause {
            Some(cause) => self.cause(cause),
            None => self,
        }
    }

    pub fn field_errors(mut self, fields: Vec<FieldError>) -> Self {
        self.fault.field_errors = fields;
        self
    }

    /// Replace the field errors with the ones parsed from `err`'s message
    pub fn validation_error(self, err: &impl fmt::Display) -> Self {
        let fields = parse_field_errors(&err.to_string());
        self.field_errors(fields)
    }

    pub fn build(self) -> Fault {
        self.fault
    }
}

impl From<FaultBuilder> for Fault {
    fn from(builder: FaultBuilder) -> Self {
        builder.build()
    }
}
