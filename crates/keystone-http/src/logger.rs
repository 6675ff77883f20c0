//! Per-request logger propagation
//!
//! [`with_logger`] stores a [`Logger`] in each request's extensions and runs
//! the rest of the stack with it attached, so `tracing` events emitted by
//! handlers (including [`crate::write_error`]) go to that logger. Handlers
//! that want the handle itself extract [`RequestLogger`].

use axum::Router;
use axum::extract::{FromRequestParts, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::request::Parts;
use keystone_fault::Fault;
use keystone_telemetry::Logger;

/// Middleware body behind [`with_logger`]
pub async fn logger_middleware(logger: Logger, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(logger.clone());
    logger.attach(next.run(request)).await
}

/// Attach `logger` to every request routed through `router`
pub fn with_logger<S>(router: Router<S>, logger: Logger) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn(move |request: Request, next: Next| {
        logger_middleware(logger.clone(), request, next)
    }))
}

/// Extractor for the logger installed by [`with_logger`]
///
/// Rejects with a 500 fault when no logger was installed.
#[derive(Debug, Clone)]
pub struct RequestLogger(pub Logger);

impl<S: Send + Sync> FromRequestParts<S> for RequestLogger {
    type Rejection = Fault;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Logger>()
            .cloned()
            .map(Self)
            .ok_or_else(|| Fault::internal_server_error("request logger is not configured"))
    }
}
