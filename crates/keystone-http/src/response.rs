use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

/// JSON response with the given status
pub fn write_json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    (status, Json(value)).into_response()
}

/// `{"message": "success"}` with the given status
pub fn write_success(status: StatusCode) -> Response {
    write_json(status, &serde_json::json!({ "message": "success" }))
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Order {
        id: u64,
        status: &'static str,
    }

    #[tokio::test]
    async fn json_body_and_status() {
        let response = write_json(StatusCode::CREATED, &Order { id: 9, status: "open" });
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "application/json");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"id":9,"status":"open"}"#);
    }

    #[tokio::test]
    async fn success_message() {
        let response = write_success(StatusCode::ACCEPTED);
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"message":"success"}"#);
    }
}
