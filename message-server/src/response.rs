//! Response framing shared by the handlers.
//!
//! Structured payloads go out as JSON with `content-type: application/json`;
//! raw text is written as-is with no content type at all.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// Serialize `payload` as JSON and write it with `status`.
pub fn json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(bytes) => {
            let mut resp = (status, Body::from(bytes)).into_response();
            resp.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            resp
        }
        Err(e) => {
            error!(error = %e, "failed to serialize response payload");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Write `text` verbatim with `status`.
pub fn raw(status: StatusCode, text: impl Into<String>) -> Response {
    let mut resp = Response::new(Body::from(text.into()));
    *resp.status_mut() = status;
    resp
}

#[cfg(test)]
mod test {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    #[tokio::test]
    async fn json_sets_content_type_and_status() {
        let resp = json(StatusCode::CREATED, &json!({ "id": 7 }));
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], br#"{"id":7}"#);
    }

    #[tokio::test]
    async fn raw_has_no_content_type() {
        let resp = raw(StatusCode::OK, "hello");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::CONTENT_TYPE).is_none());
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"hello");
    }
}
