use chrono::{DateTime, Utc};

/// A row in the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub value: String,
    pub ip_address: String,
    pub date_created: DateTime<Utc>,
}

/// One page of search results plus the number of rows matching the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
    pub total_count: i64,
    pub results: Vec<Message>,
}
