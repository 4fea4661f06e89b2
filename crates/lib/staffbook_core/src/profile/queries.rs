//! Profile queries against `user_info`.

use sqlx::PgPool;

use super::ProfileError;
use crate::models::profile::{NewProfile, UserProfile};

const PROFILE_COLUMNS: &str = "login_id, first_name, last_name, first_name_kana, last_name_kana, \
     birth, phone_number, address, gender_id, position_id, \
     upper_department, lower_department, career_start_date, notes";

/// Fetch the live profile for a login id. Soft-deleted rows are
/// excluded, so at most one row can match.
pub async fn find_profile_by_login_id(
    pool: &PgPool,
    login_id: i64,
) -> Result<Option<UserProfile>, ProfileError> {
    let row = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM user_info \
         WHERE login_id = $1 AND is_deleted = FALSE",
    ))
    .bind(login_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a profile row. Single insert, no upsert: the access gate's
/// existence check prevents a second insert for the same login id, and
/// the partial unique index on `user_info` backs that up at the store.
pub async fn insert_profile(
    pool: &PgPool,
    profile: &NewProfile,
) -> Result<UserProfile, ProfileError> {
    let row = sqlx::query_as::<_, UserProfile>(&format!(
        "INSERT INTO user_info \
         (login_id, first_name, last_name, first_name_kana, last_name_kana, \
          birth, phone_number, address, gender_id, position_id, \
          upper_department, lower_department, career_start_date, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         RETURNING {PROFILE_COLUMNS}",
    ))
    .bind(profile.login_id)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(&profile.first_name_kana)
    .bind(&profile.last_name_kana)
    .bind(profile.birth)
    .bind(&profile.phone_number)
    .bind(&profile.address)
    .bind(profile.gender.code())
    .bind(profile.position.code())
    .bind(&profile.upper_department)
    .bind(&profile.lower_department)
    .bind(profile.career_start_date)
    .bind(&profile.notes)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
