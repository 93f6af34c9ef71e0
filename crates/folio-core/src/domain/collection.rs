use serde::{Deserialize, Serialize};

use super::post::BlogPost;

/// The full set of blog posts, kept in append order.
///
/// Persisted as a bare JSON array of posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogCollection {
    posts: Vec<BlogPost>,
}

impl BlogCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_posts(posts: Vec<BlogPost>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BlogPost> {
        self.posts.iter_mut().find(|post| post.id == id)
    }

    pub fn append(&mut self, post: BlogPost) {
        self.posts.push(post);
    }

    /// Posts sorted by `created_at` descending. Ties keep reverse append
    /// order, so the later-appended post comes first.
    pub fn newest_first(&self) -> Vec<BlogPost> {
        let mut posts: Vec<BlogPost> = self.posts.iter().rev().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}
