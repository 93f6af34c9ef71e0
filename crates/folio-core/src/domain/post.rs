use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tags::{TagInput, normalize_tags};
use crate::error::DomainError;

/// Post entity - a single authored blog entry.
///
/// Serialized as `{id, title, summary, content, tags, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post; both timestamps are set to `now`.
    pub fn new(id: String, fields: PostFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            summary: fields.summary,
            content: fields.content,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `created_at` are kept and
    /// `updated_at` never moves backwards.
    pub fn revise(&mut self, fields: PostFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.summary = fields.summary;
        self.content = fields.content;
        self.tags = fields.tags;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Unvalidated create/update input.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub tags: Option<TagInput>,
}

/// Validated and normalized post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl PostInput {
    /// Trim text fields, normalize tags, and require a title and content.
    pub fn validate(self) -> Result<PostFields, DomainError> {
        let title = self.title.trim();
        let content = self.content.trim();

        if title.is_empty() || content.is_empty() {
            return Err(DomainError::Validation(
                "Title and content are required.".to_string(),
            ));
        }

        Ok(PostFields {
            title: title.to_string(),
            summary: self.summary.as_deref().unwrap_or_default().trim().to_string(),
            content: content.to_string(),
            tags: normalize_tags(self.tags),
        })
    }
}
