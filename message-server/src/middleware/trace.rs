use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{ServerError, INVALID_PAYLOAD};

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies at or above this size are summarised instead of logged.
const MAX_LOGGED_BODY: usize = 1024;

/// Request bodies are buffered here, so they are capped (axum's default limit).
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// Per-request span with a trace id, plus request/response logging.
///
/// The trace id is taken from an incoming `x-trace-id` header when it is a
/// valid UUID and generated otherwise; it is echoed on the response.
pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let response = match read_request_body(body).await {
            Ok(req_bytes) => {
                log_body("request", &parts.headers, &req_bytes);
                let mut req = Request::from_parts(parts, Body::from(req_bytes));
                if let Some(v) = &header_value {
                    req.headers_mut().insert(X_TRACE_ID, v.clone());
                }
                next.run(req).await
            }
            Err(e) => e.into_response(),
        };

        let (parts, body) = response.into_parts();
        let res_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "failed to buffer response body");
                Bytes::new()
            }
        };
        log_body("response", &parts.headers, &res_bytes);
        let mut response = Response::from_parts(parts, Body::from(res_bytes));
        if let Some(v) = header_value {
            response.headers_mut().insert(X_TRACE_ID, v);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Buffer the request body. A body that cannot be read in full never reaches
/// a handler.
async fn read_request_body(body: Body) -> Result<Bytes, ServerError> {
    match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit = MAX_REQUEST_BODY, "request body too large");
            Err(ServerError::PayloadTooLarge(format!(
                "Message payload exceeds {MAX_REQUEST_BODY} bytes"
            )))
        }
        Err(e) => {
            warn!(error = %e, "failed to buffer request body");
            Err(ServerError::BadRequest(INVALID_PAYLOAD.to_owned()))
        }
    }
}

/// Log a body when it is small JSON, otherwise just its type and size.
fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let is_json = content_type.contains("application/json");

    if is_json && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            info!("{} body: {}", direction, text);
        }
    } else if !bytes.is_empty() {
        info!(
            "{} body: [skipped: type={:?}, size={}]",
            direction,
            content_type,
            bytes.len()
        );
    }
}
