//! JSON wire form of a [`Fault`]
//!
//! Only the status, the message and the field errors cross the wire. The tag
//! and the cause stay internal.

use std::borrow::Cow;

use http::StatusCode;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::fault::Fault;
use crate::field::FieldError;
use crate::tag::Tag;

/// Body written for a fault at the HTTP boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultBody<'a> {
    pub status: u16,
    pub message: Cow<'a, str>,
    #[serde(default)]
    pub fields: Cow<'a, [FieldError]>,
}

impl<'a> From<&'a Fault> for FaultBody<'a> {
    fn from(fault: &'a Fault) -> Self {
        Self {
            status: fault.http_code.as_u16(),
            message: Cow::Borrowed(&fault.message),
            fields: Cow::Borrowed(&fault.field_errors),
        }
    }
}

impl Serialize for Fault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FaultBody::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = FaultBody::deserialize(deserializer)?;
        let http_code = StatusCode::from_u16(body.status).map_err(de::Error::custom)?;

        Ok(Self {
            http_code,
            message: body.message.into_owned(),
            tag: Tag::UNTAGGED,
            field_errors: body.fields.into_owned(),
            cause: None,
        })
    }
}
