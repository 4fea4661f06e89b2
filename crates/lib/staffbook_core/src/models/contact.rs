//! Contact domain model.

use chrono::{DateTime, Utc};

/// A contact row. Name fields are nullable: a freshly created contact is
/// blank until edited.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub first: Option<String>,
    pub last: Option<String>,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
}
