//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for message-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8080"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://messages.db"`).
    /// Use `"sqlite::memory:"` for a throwaway store.
    pub database_url: String,

    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,

    /// `tracing` filter string, e.g. `"info"` or `"debug,sqlx=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    pub enable_docs: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_address: lookup("MESSAGES_BIND").unwrap_or_else(|| "0.0.0.0:8080".to_owned()),
            database_url: lookup("MESSAGES_DATABASE_URL")
                .unwrap_or_else(|| "sqlite://messages.db".to_owned()),
            db_max_connections: parse_or(lookup("MESSAGES_DB_MAX_CONNECTIONS"), 5),
            log_level: lookup("MESSAGES_LOG").unwrap_or_else(|| "info".to_owned()),
            log_json: lookup("MESSAGES_LOG_JSON").map(|v| is_truthy(&v)).unwrap_or(false),
            cors_allowed_origins: lookup("MESSAGES_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            enable_docs: lookup("MESSAGES_ENABLE_DOCS").map(|v| is_truthy(&v)).unwrap_or(true),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config_with(&[]);
        assert_eq!(cfg.bind_address, "0.0.0.0:8080");
        assert_eq!(cfg.database_url, "sqlite://messages.db");
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.log_json);
        assert!(cfg.cors_allowed_origins.is_none());
        assert!(cfg.enable_docs);
    }

    #[test]
    fn overrides_are_honoured() {
        let cfg = config_with(&[
            ("MESSAGES_BIND", "127.0.0.1:9000"),
            ("MESSAGES_DATABASE_URL", "sqlite::memory:"),
            ("MESSAGES_DB_MAX_CONNECTIONS", "12"),
            ("MESSAGES_LOG_JSON", "TRUE"),
            ("MESSAGES_CORS_ORIGINS", "http://a.test"),
            ("MESSAGES_ENABLE_DOCS", "0"),
        ]);
        assert_eq!(cfg.bind_address, "127.0.0.1:9000");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.db_max_connections, 12);
        assert!(cfg.log_json);
        assert_eq!(cfg.cors_allowed_origins.as_deref(), Some("http://a.test"));
        assert!(!cfg.enable_docs);
    }

    #[test]
    fn unparsable_pool_size_falls_back() {
        let cfg = config_with(&[("MESSAGES_DB_MAX_CONNECTIONS", "lots")]);
        assert_eq!(cfg.db_max_connections, 5);
    }
}
