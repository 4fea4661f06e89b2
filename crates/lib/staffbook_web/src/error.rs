//! Application error types.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use staffbook_core::auth::AuthError;
use staffbook_core::profile::ProfileError;
use thiserror::Error;

use crate::views;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP response mapping.
///
/// The first two variants are navigational, not failures: the access
/// gate answers them with redirects and never renders an error page.
#[derive(Debug, Error)]
pub enum AppError {
    /// No identity key in the session.
    #[error("not signed in")]
    Unauthenticated,

    /// The signed-in login already has a live profile.
    #[error("profile already registered")]
    AlreadyRegistered,

    /// A live login record already has this email.
    #[error("email already registered")]
    DuplicateEmail,

    #[error("validation error: {0}")]
    Validation(String),

    /// Pool exhausted or connection lost. Retryable.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::AlreadyRegistered => Redirect::to("/").into_response(),
            AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                Html(views::error_page("That email is already registered.")),
            )
                .into_response(),
            AppError::Validation(m) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Html(views::error_page(&m))).into_response()
            }
            AppError::StoreUnavailable(m) => {
                tracing::error!(error = %m, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Html(views::error_page(
                        "Service temporarily unavailable. Please try again.",
                    )),
                )
                    .into_response()
            }
            AppError::Internal(m) => {
                tracing::error!(error = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::StoreUnavailable(e.to_string())
            }
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateEmail => AppError::DuplicateEmail,
            AuthError::Db(e) => AppError::from(e),
            AuthError::Internal(m) => AppError::Internal(m),
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::Db(e) => AppError::from(e),
        }
    }
}
