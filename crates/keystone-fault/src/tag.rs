use std::borrow::Cow;
use std::fmt;

/// Semantic category of a [`Fault`](crate::Fault)
///
/// Tags are independent of the HTTP status and exist for programmatic
/// branching. The set is open: services declare their own with
/// [`Tag::from_static`] or [`Tag::new`].
///
/// ```
/// use keystone_fault::Tag;
///
/// const PAYMENT_DECLINED: Tag = Tag::from_static("PAYMENT_DECLINED");
/// assert_eq!(PAYMENT_DECLINED.as_str(), "PAYMENT_DECLINED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    pub const UNTAGGED: Self = Self::from_static("UNTAGGED");
    pub const BAD_REQUEST: Self = Self::from_static("BAD_REQUEST");
    pub const NOT_FOUND: Self = Self::from_static("NOT_FOUND");
    pub const INTERNAL_SERVER_ERROR: Self = Self::from_static("INTERNAL_SERVER_ERROR");
    pub const UNAUTHORIZED: Self = Self::from_static("UNAUTHORIZED");
    pub const FORBIDDEN: Self = Self::from_static("FORBIDDEN");
    pub const CONFLICT: Self = Self::from_static("CONFLICT");
    pub const TOO_MANY_REQUESTS: Self = Self::from_static("TOO_MANY_REQUESTS");
    pub const VALIDATION_ERROR: Self = Self::from_static("VALIDATION_ERROR");
    pub const UNPROCESSABLE_ENTITY: Self = Self::from_static("UNPROCESSABLE_ENTITY");
    /// Storage or cache backend failure
    pub const DATABASE: Self = Self::from_static("DATABASE");
    /// Transaction begin, commit or rollback failure
    pub const TRANSACTION: Self = Self::from_static("TRANSACTION");

    /// Create a tag from a string literal, usable in `const` items
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a tag from an owned string
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::UNTAGGED
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}
