use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

/// A user together with the stored password hash. Kept separate from
/// `User` so the hash never leaks into view state.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) password_hash: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    /// Inserts a new user. The storage-level unique constraint on username
    /// is the source of truth: a violation maps to `DuplicateUsername`.
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;

    /// Exact, case-sensitive lookup.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserCredentials>, DomainError>;
}
