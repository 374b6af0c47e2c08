use super::error::DomainError;

/// Form input for registration. Validation order is load-bearing: the
/// user-facing message depends on which check trips first.
#[derive(Debug, Clone)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) confirm_password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(DomainError::Validation("All fields are required"));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::Validation("Passwords do not match"));
        }
        if self.password.chars().count() < 6 {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters",
            ));
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
            confirm_password: self.confirm_password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    /// Empty fields fail with the same error as a bad password, so the
    /// response never hints at which part was wrong.
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
}

impl User {
    pub(crate) fn new(id: i64, username: impl Into<String>) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation("id must be > 0"));
        }
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::Validation("username must not be empty"));
        }
        Ok(Self { id, username })
    }
}
