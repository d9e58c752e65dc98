//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a `{"error": "..."}` JSON body with an appropriate status code.
//!
//! Storage failures are returned to the caller with the driver's own
//! description; the full error is also logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::response;

/// Body of the 400 returned when a request body cannot be read or decoded.
pub const INVALID_PAYLOAD: &str = "Invalid message payload";

/// All errors that can occur in the message-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the SQL store.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// The caller referenced a resource that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller sent an invalid or malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// The request body exceeded the accepted size.
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let ServerError::Database(e) = &self {
            error!(error = %e, "database error");
        }
        response::json(self.status(), &json!({ "error": self.to_string() }))
    }
}
