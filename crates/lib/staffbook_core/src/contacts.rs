//! Contact persistence.

use sqlx::PgPool;

use crate::models::contact::Contact;

/// List contacts, optionally filtered by a free-text query against the
/// name fields, ordered by name.
pub async fn list_contacts(pool: &PgPool, q: Option<&str>) -> Result<Vec<Contact>, sqlx::Error> {
    match q {
        Some(q) if !q.is_empty() => {
            sqlx::query_as::<_, Contact>(
                "SELECT id, first, last, favorite, created_at FROM contacts \
                 WHERE first ILIKE '%' || $1 || '%' OR last ILIKE '%' || $1 || '%' \
                 ORDER BY last NULLS LAST, first NULLS LAST, id",
            )
            .bind(q)
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Contact>(
                "SELECT id, first, last, favorite, created_at FROM contacts \
                 ORDER BY last NULLS LAST, first NULLS LAST, id",
            )
            .fetch_all(pool)
            .await
        }
    }
}

/// Create a blank contact, returning the stored row.
pub async fn create_empty_contact(pool: &PgPool) -> Result<Contact, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        "INSERT INTO contacts DEFAULT VALUES \
         RETURNING id, first, last, favorite, created_at",
    )
    .fetch_one(pool)
    .await
}
