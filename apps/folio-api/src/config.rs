//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Where blog posts are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// JSON file at the given path.
    File(PathBuf),
    /// Process memory only; posts are lost on restart.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret for blog writes. `None` disables writes.
    pub admin_secret: Option<String>,
    pub store: StoreBackend,
    /// Allowed CORS origins. Empty allows every origin.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store = match lookup("BLOG_STORE").as_deref().map(str::trim) {
            Some(kind) if kind.eq_ignore_ascii_case("memory") => StoreBackend::Memory,
            _ => StoreBackend::File(
                lookup("BLOG_DATA_FILE")
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| "data/blogs.json".to_string())
                    .into(),
            ),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            admin_secret: lookup("BLOG_ADMIN_SECRET").filter(|s| !s.trim().is_empty()),
            store,
            cors_origins: Self::parse_origins(lookup("CORS_ORIGINS").as_deref().unwrap_or("")),
        }
    }

    /// Parse a comma-separated origin list.
    /// Example: CORS_ORIGINS=https://me.dev, http://localhost:5173
    fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}
