use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{BlogCollection, BlogPost, PostInput};
use crate::error::DomainError;
use crate::ports::{BlogStore, Clock, Loaded};

/// Blog service - validation, ordering and write authorization over a
/// [`BlogStore`].
///
/// Every operation reloads the full collection, so the store stays the single
/// source of truth. Writes are serialized through one async mutex held across
/// the load-modify-save sequence; reads never wait on it.
pub struct BlogService {
    store: Arc<dyn BlogStore>,
    clock: Arc<dyn Clock>,
    admin_secret: Option<String>,
    write_lock: Mutex<()>,
}

impl BlogService {
    /// Build the service. A blank `admin_secret` counts as not configured,
    /// which disables every write.
    pub fn new(
        store: Arc<dyn BlogStore>,
        clock: Arc<dyn Clock>,
        admin_secret: Option<String>,
    ) -> Self {
        Self {
            store,
            clock,
            admin_secret: admin_secret.filter(|secret| !secret.trim().is_empty()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn writes_enabled(&self) -> bool {
        self.admin_secret.is_some()
    }

    /// All posts, most recently created first.
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        let collection = self.load().await?;
        Ok(collection.newest_first())
    }

    pub async fn get_post(&self, id: &str) -> Result<BlogPost, DomainError> {
        let collection = self.load().await?;
        collection
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create_post(
        &self,
        input: PostInput,
        credential: Option<&str>,
    ) -> Result<BlogPost, DomainError> {
        self.authorize(credential)?;
        let fields = input.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.load().await?;

        let post = BlogPost::new(Self::fresh_id(&collection), fields, self.now());
        collection.append(post.clone());
        self.store.save(&collection).await?;

        tracing::info!(post_id = %post.id, "Blog post created");
        Ok(post)
    }

    pub async fn update_post(
        &self,
        id: &str,
        input: PostInput,
        credential: Option<&str>,
    ) -> Result<BlogPost, DomainError> {
        self.authorize(credential)?;
        let fields = input.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.load().await?;

        let now = self.now();
        let post = collection
            .get_mut(id)
            .ok_or_else(|| DomainError::post_not_found(id))?;
        post.revise(fields, now);
        let updated = post.clone();
        self.store.save(&collection).await?;

        tracing::info!(post_id = %updated.id, "Blog post updated");
        Ok(updated)
    }

    fn authorize(&self, credential: Option<&str>) -> Result<(), DomainError> {
        let Some(secret) = self.admin_secret.as_deref() else {
            tracing::warn!("Write rejected: admin secret is not configured");
            return Err(DomainError::ServiceMisconfigured);
        };

        match credential {
            Some(presented) if presented == secret => Ok(()),
            _ => {
                tracing::debug!("Write rejected: missing or mismatched credential");
                Err(DomainError::Unauthorized)
            }
        }
    }

    async fn load(&self) -> Result<BlogCollection, DomainError> {
        let loaded = self.store.load().await?;
        match &loaded {
            Loaded::Initialized => tracing::debug!("Initialized empty blog collection"),
            Loaded::CorruptFallback { reason } => {
                tracing::warn!(%reason, "Persisted blog collection unreadable, serving it as empty")
            }
            Loaded::Existing(_) => {}
        }
        Ok(loaded.into_collection())
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    fn fresh_id(collection: &BlogCollection) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !collection.contains(&id) {
                return id;
            }
        }
    }
}
