use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The identity that wrote a post, denormalized onto the post itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// Post entity - a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub author: Author,
    pub published_date: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    ///
    /// Ids are UUID v7, so ordering by id is ordering by creation time.
    pub fn new(author: Author, title: String, body: String, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            body,
            tags,
            author,
            published_date: Utc::now(),
        }
    }

    pub fn is_written_by(&self, user_id: Uuid) -> bool {
        self.author.id == user_id
    }

    /// Fails with [`DomainError::Forbidden`] unless `user_id` wrote this post.
    pub fn ensure_owned_by(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.is_written_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden {
                entity_type: "post",
            })
        }
    }
}

/// Parse a post id from its textual form.
pub fn parse_post_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::MalformedId(raw.to_string()))
}

/// Partial replacement of a post's editable fields.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
    }
}

/// Listing filter. Both criteria must hold when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub username: Option<String>,
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        let username_ok = self
            .username
            .as_deref()
            .is_none_or(|name| post.author.username == name);
        let tag_ok = self
            .tag
            .as_deref()
            .is_none_or(|tag| post.tags.iter().any(|t| t == tag));

        username_ok && tag_ok
    }
}

/// One page of posts plus the number of posts matching the filter overall.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total: u64,
}
