use std::future::Future;

use tracing::debug;

use crate::entities::{Message, Page, SearchQuery, SqliteStore};

pub trait MessageStore: Send + Sync + 'static {
    /// Fetch one message. `Ok(None)` when no row has this id.
    fn get_message(&self, id: i64) -> impl Future<Output = Result<Option<Message>, sqlx::Error>> + Send;
    /// Delete one message, returning the number of rows removed (0 or 1).
    fn delete_message(&self, id: i64) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;
    /// Insert a message; the returned record carries the generated id.
    fn create_message(
        &self,
        value: &str,
        ip_address: &str,
    ) -> impl Future<Output = Result<Message, sqlx::Error>> + Send;
    fn search_messages(&self, query: &SearchQuery) -> impl Future<Output = Result<Page, sqlx::Error>> + Send;
}

impl MessageStore for SqliteStore {
    async fn get_message(&self, id: i64) -> Result<Option<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT id, value, ip_address, date_created FROM messages WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_message(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn create_message(&self, value: &str, ip_address: &str) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (value, ip_address) VALUES (?1, ?2) \
             RETURNING id, value, ip_address, date_created",
        )
        .bind(value)
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
    }

    async fn search_messages(&self, query: &SearchQuery) -> Result<Page, sqlx::Error> {
        let mut count = query.count_query();
        let total_count: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut page = query.page_query();
        let results: Vec<Message> = page.build_query_as().fetch_all(&self.pool).await?;

        debug!(
            offset = query.offset,
            limit = query.limit,
            total_count,
            returned = results.len(),
            "message search"
        );

        Ok(Page {
            offset: query.offset,
            limit: query.limit,
            total_count,
            results,
        })
    }
}
