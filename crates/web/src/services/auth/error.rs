//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] gripen_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// User-facing message for the login and registration forms.
    ///
    /// Credential problems collapse into one message so the form does not
    /// reveal whether an account exists.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Invalid email address format.".to_owned(),
            Self::InvalidCredentials => "Incorrect email or password.".to_owned(),
            Self::UserAlreadyExists => "An account with this email already exists.".to_owned(),
            Self::WeakPassword(msg) => msg.clone(),
            Self::Repository(_) | Self::PasswordHash => {
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_collapse() {
        // Same message whether the account is missing or the password wrong.
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Incorrect email or password."
        );
    }

    #[test]
    fn test_existing_account_message() {
        assert!(
            AuthError::UserAlreadyExists
                .user_message()
                .contains("already exists")
        );
    }
}
