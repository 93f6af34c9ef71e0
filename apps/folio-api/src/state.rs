//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::BlogService;
use folio_core::ports::{BlogStore, Clock};
use folio_infra::{InMemoryBlogStore, JsonFileBlogStore, SystemClock};

use crate::config::{AppConfig, StoreBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<BlogService>,
}

impl AppState {
    /// Build the application state with the configured store.
    pub fn new(config: &AppConfig) -> Self {
        let store: Arc<dyn BlogStore> = match &config.store {
            StoreBackend::File(path) => {
                tracing::info!(path = %path.display(), "Using JSON file blog store");
                Arc::new(JsonFileBlogStore::new(path))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory blog store. Posts are lost on restart.");
                Arc::new(InMemoryBlogStore::new())
            }
        };

        if config.admin_secret.is_none() {
            tracing::warn!("BLOG_ADMIN_SECRET not set. Blog writes are disabled.");
        }

        let state = Self::from_parts(store, Arc::new(SystemClock), config.admin_secret.clone());
        tracing::info!("Application state initialized");
        state
    }

    /// Assemble the state from explicit collaborators.
    pub fn from_parts(
        store: Arc<dyn BlogStore>,
        clock: Arc<dyn Clock>,
        admin_secret: Option<String>,
    ) -> Self {
        Self {
            blogs: Arc::new(BlogService::new(store, clock, admin_secret)),
        }
    }
}
