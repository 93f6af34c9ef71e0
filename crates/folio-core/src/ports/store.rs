use async_trait::async_trait;

use crate::domain::BlogCollection;
use crate::error::StoreError;

/// Outcome of loading the persisted collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// Nothing was persisted yet; an empty collection has just been written.
    Initialized,
    /// The persisted collection, read successfully.
    Existing(BlogCollection),
    /// The persisted payload could not be read as a collection and is served
    /// as empty.
    CorruptFallback { reason: String },
}

impl Loaded {
    pub fn into_collection(self) -> BlogCollection {
        match self {
            Loaded::Existing(collection) => collection,
            Loaded::Initialized | Loaded::CorruptFallback { .. } => BlogCollection::new(),
        }
    }
}

/// Blog store trait - durable storage of the whole collection as one unit.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Load the full collection, initializing an empty one if none exists.
    async fn load(&self) -> Result<Loaded, StoreError>;

    /// Atomically replace the persisted collection.
    async fn save(&self, collection: &BlogCollection) -> Result<(), StoreError>;
}
