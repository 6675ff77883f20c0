//! Axum response for [`Fault`]
//!
//! The body is the wire form (`status`, `message`, `fields`) and the status
//! line is the fault's HTTP code. The tag and cause never leave the process.

use axum::Json;
use axum::response::{IntoResponse, Response};

use crate::fault::Fault;
use crate::wire::FaultBody;

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        (&self).into_response()
    }
}

impl IntoResponse for &Fault {
    fn into_response(self) -> Response {
        (self.http_code(), Json(FaultBody::from(self))).into_response()
    }
}
