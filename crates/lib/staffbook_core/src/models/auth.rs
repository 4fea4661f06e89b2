//! Credential domain models.

/// Role id assigned to self-registered users.
pub const DEFAULT_ROLE_ID: i32 = 20;

/// A live credential row from `login_info`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LoginRecord {
    pub login_id: i64,
    pub email: String,
    pub pw_hash: String,
    pub role_id: i32,
}

/// Attributes for inserting a new login record.
#[derive(Debug, Clone)]
pub struct NewLogin<'a> {
    pub email: &'a str,
    pub pw_hash: &'a str,
    pub role_id: i32,
}

impl<'a> NewLogin<'a> {
    /// A new login with the default role.
    pub fn new(email: &'a str, pw_hash: &'a str) -> Self {
        Self {
            email,
            pw_hash,
            role_id: DEFAULT_ROLE_ID,
        }
    }
}
