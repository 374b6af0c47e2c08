use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Inserts a post with a server-assigned creation timestamp. Input is
    /// already trimmed and validated by the caller.
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;

    /// Every post joined with its author's username, newest first
    /// (created_at descending, id descending as the tiebreak).
    async fn list_all_with_authors(&self) -> Result<Vec<PostWithAuthor>, DomainError>;
}
