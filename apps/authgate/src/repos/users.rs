//! User store contract consumed by the login handler and auth middleware.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::error::AppError;

pub type UserId = i64;

/// Application-level identity owned by the user store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    password: String,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
        }
    }

    /// Compare a submitted password with the stored credential.
    pub fn match_password(&self, candidate: &str) -> Result<(), CredentialError> {
        if self.password == candidate {
            Ok(())
        } else {
            Err(CredentialError::PasswordMismatch)
        }
    }
}

/// Outcome of a failed credential check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("no user with that email")]
    NotFound,
    #[error("password does not match")]
    PasswordMismatch,
    #[error("user store unavailable: {detail}")]
    Unavailable { detail: String },
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            // Both collapse to one error so responses never reveal whether an
            // account exists.
            CredentialError::NotFound | CredentialError::PasswordMismatch => {
                AppError::credentials_invalid()
            }
            CredentialError::Unavailable { detail } => AppError::internal(detail),
        }
    }
}

/// Lookup of users by email (login) and by id (per-request resolution).
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Resolve `email` and check `password` against the stored credential.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, CredentialError> {
        let user = self
            .find_by_email(email)
            .await
            .map_err(|e| CredentialError::Unavailable {
                detail: e.to_string(),
            })?
            .ok_or(CredentialError::NotFound)?;

        user.match_password(password)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialError, User};
    use crate::error::AppError;

    #[test]
    fn test_match_password() {
        let user = User::new(1, "user@email.com", "password");
        assert_eq!(user.match_password("password"), Ok(()));
        assert_eq!(
            user.match_password("Password"),
            Err(CredentialError::PasswordMismatch)
        );
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User::new(1, "user@email.com", "hunter2");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "email": "user@email.com"}));
    }

    #[test]
    fn test_not_found_and_mismatch_map_to_same_error() {
        let a: AppError = CredentialError::NotFound.into();
        let b: AppError = CredentialError::PasswordMismatch.into();
        assert_eq!(a.code(), b.code());
        assert_eq!(a.message(), b.message());
        assert_eq!(a.status(), b.status());
    }
}
