//! Credential handling: password hashing and login-record queries.

pub mod password;
pub mod queries;

use thiserror::Error;

/// Credential-store errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A live (non-deleted) login record already has this email.
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
