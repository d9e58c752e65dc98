//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional OpenAPI document (disable with `MESSAGES_ENABLE_DOCS=false`)
//! - Health / heartbeat route
//! - `/messages/` routes

pub mod doc;
mod health;
mod messages;

use axum::routing::get;
use axum::{middleware, Json, Router};
use std::sync::Arc;

use crate::entities::MessageStore;
use crate::middleware::{cors, trace};
use crate::state::AppState;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build<S: MessageStore>(state: Arc<AppState<S>>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(messages::router());

    if state.config.enable_docs {
        let api_doc = doc::get_docs();
        app = app.route(
            "/api-docs/openapi.json",
            get(move || async move { Json(api_doc) }),
        );
    }

    app
        // Outermost layers execute first on the way in.
        .layer(cors::cors_layer(&state.config))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::entities::memory_store;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn app_with(pairs: &'static [(&'static str, &'static str)]) -> Router {
        let config = Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        });
        build(Arc::new(AppState::new(config, memory_store().await)))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn every_response_carries_a_trace_id() {
        let app = app_with(&[]).await;
        let resp = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(trace::X_TRACE_ID));
    }

    #[tokio::test]
    async fn openapi_document_is_served_by_default() {
        let app = app_with(&[]).await;
        let resp = app.oneshot(get_request("/api-docs/openapi.json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_can_be_disabled() {
        let app = app_with(&[("MESSAGES_ENABLE_DOCS", "false")]).await;
        let resp = app.oneshot(get_request("/api-docs/openapi.json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    fn from_origin(origin: &str) -> Request<Body> {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let app = app_with(&[]).await;
        let resp = app.oneshot(from_origin("http://example.com")).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn cors_echoes_only_configured_origins() {
        let app = app_with(&[("MESSAGES_CORS_ORIGINS", "http://a.test, http://b.test")]).await;

        let resp = app.clone().oneshot(from_origin("http://b.test")).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://b.test"
        );

        let resp = app.oneshot(from_origin("http://evil.test")).await.unwrap();
        assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
