use thiserror::Error;

/// Errors surfaced by the core blog logic. Everything except
/// `StoreUnavailable` is user-correctable and rendered as an inline banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum DomainError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("You must be logged in to create posts")]
    AuthRequired,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}
