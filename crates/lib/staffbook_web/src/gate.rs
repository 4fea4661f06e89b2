//! Access gate for the one-time registration flow.
//!
//! Evaluated on every request to `/user/new`, read and write paths
//! alike. The identity key comes from the sealed session only — a
//! `login_id` in the form body is never trusted.

use sqlx::PgPool;
use staffbook_core::profile::queries::find_profile_by_login_id;
use staffbook_core::session::Session;

use crate::error::{AppError, AppResult};

/// Loader payload for the registration form view.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationLoader {
    /// Identity key the form submits against.
    pub login_id: i64,
}

/// Read-path decision for `GET /user/new`.
///
/// Terminal outcomes, in order:
/// 1. no identity key → [`AppError::Unauthenticated`], which redirects
///    to `/login` before anything downstream runs;
/// 2. a live profile exists → [`AppError::AlreadyRegistered`], which
///    redirects to `/` — registration is a one-time action;
/// 3. otherwise proceed with the loader payload.
pub async fn registration_loader(
    pool: &PgPool,
    session: &Session,
) -> AppResult<RegistrationLoader> {
    let login_id = session.user_id().ok_or(AppError::Unauthenticated)?;

    if find_profile_by_login_id(pool, login_id).await?.is_some() {
        return Err(AppError::AlreadyRegistered);
    }

    Ok(RegistrationLoader { login_id })
}

/// Write-path precondition for `POST /user/new`.
///
/// Same decision as the read path: a submission without a session
/// identity redirects to `/login` rather than attempting the insert,
/// and a second submission for an already-registered login redirects to
/// `/` without inserting. Returns the identity key the new profile must
/// be attributed to.
pub async fn registration_identity(pool: &PgPool, session: &Session) -> AppResult<i64> {
    let loader = registration_loader(pool, session).await?;
    Ok(loader.login_id)
}
