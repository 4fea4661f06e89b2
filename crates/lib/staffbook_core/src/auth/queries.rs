//! Login-record queries against `login_info`.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::{LoginRecord, NewLogin};

/// Fetch a live login record by email. Soft-deleted rows are excluded.
pub async fn find_login_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<LoginRecord>, AuthError> {
    let row = sqlx::query_as::<_, LoginRecord>(
        "SELECT login_id, email, pw_hash, role_id FROM login_info \
         WHERE email = $1 AND is_deleted = FALSE",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a login record, returning the stored row with its assigned id.
///
/// The audit columns are set to the email. A unique violation on the
/// live-email index surfaces as [`AuthError::DuplicateEmail`]; a
/// soft-deleted row with the same email does not block the insert.
pub async fn insert_login(pool: &PgPool, new: &NewLogin<'_>) -> Result<LoginRecord, AuthError> {
    sqlx::query_as::<_, LoginRecord>(
        "INSERT INTO login_info (email, pw_hash, role_id, create_user, update_user) \
         VALUES ($1, $2, $3, $1, $1) \
         RETURNING login_id, email, pw_hash, role_id",
    )
    .bind(new.email)
    .bind(new.pw_hash)
    .bind(new.role_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() => AuthError::DuplicateEmail,
        _ => AuthError::Db(e),
    })
}
