//! Database abstraction layer.
//!
//! [`MessageStore`] defines the operations the HTTP layer needs. The default
//! implementation is [`SqliteStore`]; handlers only see the trait methods.
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.

pub mod dao;
pub mod message;
pub mod query;

pub use dao::{Message, Page};
pub use message::MessageStore;
pub use query::SearchQuery;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://messages.db"`
    /// or `"sqlite::memory:"` for tests. In-memory databases are private to a
    /// connection, so pass `max_connections = 1` for them.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        // LIKE filters are case-sensitive substring/prefix matches.
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .pragma("case_sensitive_like", "ON");
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Close every pooled connection. Subsequent queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) async fn memory_store() -> SqliteStore {
    SqliteStore::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory sqlite store")
}
