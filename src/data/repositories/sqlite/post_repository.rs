use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};

#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostWithAuthorRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    username: String,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (author_id, title, content, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, content, author_id, created_at
            "#,
        )
        .bind(input.author_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn list_all_with_authors(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.created_at, u.username
            FROM posts p
            JOIN users u ON p.author_id = u.id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter()
            .map(|r| {
                let post = Post::new(r.id, r.title, r.content, r.author_id, r.created_at)
                    .map_err(|err| DomainError::StoreUnavailable(err.to_string()))?;
                Ok(PostWithAuthor {
                    post,
                    author_username: r.username,
                })
            })
            .collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(row.id, row.title, row.content, row.author_id, row.created_at)
        .map_err(|err| DomainError::StoreUnavailable(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::StoreUnavailable(err.to_string())
}
