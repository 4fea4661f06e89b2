//! Employee-profile persistence.

pub mod queries;

use thiserror::Error;

/// Profile-store errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
