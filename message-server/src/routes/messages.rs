//! `/messages/` endpoints: search, create, fetch and delete.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::entities::MessageStore;
use crate::error::{ServerError, INVALID_PAYLOAD};
use crate::handlers::{params, PeerAddr};
use crate::response;
use crate::schemas::message::{
    CreatedResponse, DeletedResponse, MessageResponse, PageResponse, SearchParams,
};
use crate::state::AppState;

const INVALID_ID: &str = "Invalid message ID";
const NOT_FOUND: &str = "Message not found";

#[derive(OpenApi)]
#[openapi(
    paths(search_messages, create_message, get_message, delete_message),
    components(schemas(
        MessageResponse,
        PageResponse,
        CreatedResponse,
        DeletedResponse
    ))
)]
pub struct MessagesApi;

/// Register message routes.
pub fn router<S: MessageStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route(
            "/messages/",
            get(search_messages::<S>).post(create_message::<S>),
        )
        .route(
            "/messages/{id}",
            get(get_message::<S>).delete(delete_message::<S>),
        )
}

/// Path ids are `[0-9]+` and must fit in an `i64`.
///
/// `/messages/{id}` matches any segment, so a non-digit id such as `abc` or
/// `-1` is answered with 400 here rather than a 404 from the router.
fn parse_message_id(raw: &str) -> Result<i64, ServerError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServerError::BadRequest(INVALID_ID.to_owned()));
    }
    raw.parse::<i64>()
        .map_err(|_| ServerError::BadRequest(INVALID_ID.to_owned()))
}

#[utoipa::path(
    get,
    path = "/messages/",
    tag = "messages",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching messages", body = PageResponse),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn search_messages<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ServerError> {
    let query = params::search_query(&pairs);
    let page = state.store.search_messages(&query).await?;
    Ok(response::json(StatusCode::OK, &page.to_response()))
}

#[utoipa::path(
    post,
    path = "/messages/",
    tag = "messages",
    request_body(content = String, content_type = "text/plain", description = "Message text"),
    responses(
        (status = 201, description = "Message stored", body = CreatedResponse),
        (status = 400, description = "Body is unreadable or not UTF-8"),
        (status = 413, description = "Body exceeds the request size limit"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn create_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    peer: PeerAddr,
    body: Bytes,
) -> Result<Response, ServerError> {
    let value = String::from_utf8(body.to_vec())
        .map_err(|_| ServerError::BadRequest(INVALID_PAYLOAD.to_owned()))?;

    let ip_address = match peer.client_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            debug!(error = %e, "recording message without client address");
            String::new()
        }
    };

    let message = state.store.create_message(&value, &ip_address).await?;
    info!(id = message.id, ip_address = %message.ip_address, "message created");
    Ok(response::json(
        StatusCode::CREATED,
        &CreatedResponse { id: message.id },
    ))
}

#[utoipa::path(
    get,
    path = "/messages/{id}",
    tag = "messages",
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Raw message text", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Message not found"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn get_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let id = parse_message_id(&id)?;
    let message = state
        .store
        .get_message(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(NOT_FOUND.to_owned()))?;
    Ok(response::raw(StatusCode::OK, message.value))
}

#[utoipa::path(
    delete,
    path = "/messages/{id}",
    tag = "messages",
    params(("id" = i64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message deleted (or never existed)", body = DeletedResponse),
        (status = 400, description = "Malformed ID"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn delete_message<S: MessageStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let id = parse_message_id(&id)?;
    let removed = state.store.delete_message(id).await?;
    info!(id, removed, "message delete");
    Ok(response::json(
        StatusCode::OK,
        &DeletedResponse {
            result: "success".to_owned(),
        },
    ))
}
