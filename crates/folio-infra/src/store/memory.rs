//! In-memory blog store - used for tests and ephemeral runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::domain::{BlogCollection, BlogPost};
use folio_core::error::StoreError;
use folio_core::ports::{BlogStore, Loaded};

enum MemoryState {
    Uninitialized,
    Stored(BlogCollection),
    Corrupt(String),
}

/// In-memory blog store using an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlogStore {
    state: RwLock<MemoryState>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::Uninitialized),
        }
    }

    /// Start with the given posts already persisted.
    pub fn seeded(posts: Vec<BlogPost>) -> Self {
        Self {
            state: RwLock::new(MemoryState::Stored(BlogCollection::from_posts(posts))),
        }
    }

    /// Start in the state of an unreadable persisted payload.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(MemoryState::Corrupt(reason.into())),
        }
    }

    /// Current persisted collection; empty unless something was saved or
    /// seeded.
    pub async fn snapshot(&self) -> BlogCollection {
        match &*self.state.read().await {
            MemoryState::Stored(collection) => collection.clone(),
            MemoryState::Uninitialized | MemoryState::Corrupt(_) => BlogCollection::new(),
        }
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn load(&self) -> Result<Loaded, StoreError> {
        {
            let state = self.state.read().await;
            match &*state {
                MemoryState::Stored(collection) => return Ok(Loaded::Existing(collection.clone())),
                MemoryState::Corrupt(reason) => {
                    return Ok(Loaded::CorruptFallback {
                        reason: reason.clone(),
                    });
                }
                MemoryState::Uninitialized => {}
            }
        }

        let mut state = self.state.write().await;
        if let MemoryState::Stored(collection) = &*state {
            return Ok(Loaded::Existing(collection.clone()));
        }
        *state = MemoryState::Stored(BlogCollection::new());
        Ok(Loaded::Initialized)
    }

    async fn save(&self, collection: &BlogCollection) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        *state = MemoryState::Stored(collection.clone());
        Ok(())
    }
}
