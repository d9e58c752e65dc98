use crate::entities::{Message, Page};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string accepted by `GET /messages/`.
///
/// Only used for documentation; the handler resolves the raw pairs itself so
/// that repeated or malformed values fall back to defaults instead of failing.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Page size, 1 to 20 (default 20).
    pub limit: Option<i64>,
    /// Rows to skip (default 0).
    pub offset: Option<i64>,
    /// Substring the message must contain.
    pub message: Option<String>,
    /// Prefix the client IP address must start with.
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub value: String,
    pub ip_address: String,
    pub date_created: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageResponse {
    pub offset: i64,
    pub limit: i64,
    pub total_count: i64,
    pub results: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub result: String,
}

impl Message {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id,
            value: self.value.clone(),
            ip_address: self.ip_address.clone(),
            date_created: self.date_created.to_rfc3339(),
        }
    }
}

impl Page {
    pub fn to_response(&self) -> PageResponse {
        PageResponse {
            offset: self.offset,
            limit: self.limit,
            total_count: self.total_count,
            results: self.results.iter().map(Message::to_response).collect(),
        }
    }
}
