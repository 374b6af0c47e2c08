use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostWithAuthor};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// `author_id` comes from an active session, so the author is known to
    /// exist; the store does not re-validate it.
    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            author_id,
        };
        self.repo.create_post(new_post).await
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        self.repo.list_all_with_authors().await
    }
}
