//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
///
/// Handlers are generic over the store so any [`crate::entities::MessageStore`]
/// can back the routes; the server runs on [`SqliteStore`].
#[derive(Debug)]
pub struct AppState<S = SqliteStore> {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Message store; must be safe for concurrent use.
    pub store: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(config: Config, store: S) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}
