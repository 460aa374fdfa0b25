use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slugify;

/// Average reading speed used for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub views_count: i64,
    pub likes_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post. The slug is derived from the title.
    pub fn new(author_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: None,
            slug: slugify(&title),
            title,
            excerpt: None,
            content: content.into(),
            featured_image: None,
            status: PostStatus::Draft,
            views_count: 0,
            likes_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the post published as of `at`.
    pub fn publish(mut self, at: DateTime<Utc>) -> Self {
        self.status = PostStatus::Published;
        self.published_at = Some(at);
        self
    }

    /// Move the post to a non-public status, clearing its publication time.
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        if status != PostStatus::Published {
            self.published_at = None;
        }
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_featured_image(mut self, image: impl Into<String>) -> Self {
        self.featured_image = Some(image.into());
        self
    }

    pub fn with_counts(mut self, views_count: i64, likes_count: i64) -> Self {
        self.views_count = views_count;
        self.likes_count = likes_count;
        self
    }

    /// Whether the post may be shown on public pages.
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published && self.published_at.is_some()
    }

    /// Estimated reading time in whole minutes, never less than one.
    pub fn reading_time_minutes(&self) -> u32 {
        let words = self.content.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
    }
}
