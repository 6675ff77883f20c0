use axum::response::{IntoResponse, Response};
use keystone_fault::{Fault, find_fault};

use crate::body::BodyError;

/// Message sent for errors that carry no [`Fault`]
pub const UNEXPECTED_ERROR_MESSAGE: &str = "an unexpected error occurred";

/// Write the response for an error raised while handling a request
///
/// The first [`Fault`] in the chain decides the status and body. A
/// [`BodyError`] becomes a 400 fault. Anything else is logged and answered
/// with a generic 500 so internal details never reach the client.
pub fn write_error(err: &anyhow::Error) -> Response {
    if let Some(fault) = find_fault(&**err) {
        return fault.into_response();
    }

    if let Some(body_err) = err.chain().find_map(|e| e.downcast_ref::<BodyError>()) {
        return body_err.clone().into_response();
    }

    tracing::error!(error = ?err, "unhandled error");
    Fault::internal_server_error(UNEXPECTED_ERROR_MESSAGE).into_response()
}

/// Handler error that renders through [`write_error`]
///
/// Any error convertible into [`anyhow::Error`] converts into `ApiError`, so
/// handlers can use `?` freely:
///
/// ```
/// use axum::Json;
/// use keystone_fault::Fault;
/// use keystone_http::ApiError;
///
/// fn find_user(id: u64) -> Result<String, Fault> {
///     Err(Fault::not_found(format!("user {id} not found")))
/// }
///
/// async fn show_user() -> Result<Json<String>, ApiError> {
///     let name = find_user(7)?;
///     Ok(Json(name))
/// }
/// ```
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub const fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        write_error(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::Context;
    use axum::body::to_bytes;
    use http::StatusCode;
    use keystone_config::LoggingConfig;
    use keystone_fault::FaultBuilder;
    use keystone_telemetry::Logger;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn fault_is_written_with_its_status() {
        let err = anyhow::Error::from(Fault::validation("invalid body", &"email: is required"));
        let response = write_error(&err);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["message"], "invalid body");
        assert_eq!(body["fields"][0]["field"], "email");
    }

    #[tokio::test]
    async fn fault_behind_context_is_found() {
        let err = Err::<(), _>(Fault::conflict("email taken"))
            .context("creating user")
            .unwrap_err();
        let response = write_error(&err);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn outermost_fault_wins() {
        let inner = Fault::not_found("row not found");
        let outer = FaultBuilder::internal_server_error("could not load order").cause(inner).build();
        let response = write_error(&anyhow::Error::from(outer));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "could not load order");
    }

    #[tokio::test]
    async fn body_error_is_a_bad_request() {
        let response = write_error(&anyhow::Error::from(BodyError::Empty));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "request body cannot be empty");
    }

    #[tokio::test]
    async fn other_errors_are_masked_and_logged() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = Arc::clone(&buf);
        let logger = Logger::with_writer(&LoggingConfig::default(), move || SharedWriter(Arc::clone(&writer)));

        let err = anyhow::anyhow!("password authentication failed for user \"app\"");
        let response = logger.in_scope(|| write_error(&err));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], UNEXPECTED_ERROR_MESSAGE);
        assert!(!body.to_string().contains("password"));

        let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("password authentication failed"));
    }

    #[tokio::test]
    async fn api_error_converts_with_question_mark() {
        fn load_order() -> Result<u64, Fault> {
            Err(Fault::forbidden("not your order"))
        }

        fn handler() -> Result<u64, ApiError> {
            let id = load_order()?;
            Ok(id)
        }

        let response = handler().unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
