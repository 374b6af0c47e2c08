use chrono::{DateTime, Utc};

use super::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

/// A post joined with its author's username, as shown on the home page.
#[derive(Debug, Clone)]
pub(crate) struct PostWithAuthor {
    pub(crate) post: Post,
    pub(crate) author_username: String,
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(DomainError::Validation("Title and content are required"));
        }
        if title.len() > 255 {
            return Err(DomainError::Validation(
                "Title must be at most 255 characters",
            ));
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation("id must be > 0"));
        }
        if author_id <= 0 {
            return Err(DomainError::Validation("author_id must be > 0"));
        }
        Ok(Self {
            id,
            title: title.into(),
            content: content.into(),
            author_id,
            created_at,
        })
    }
}
