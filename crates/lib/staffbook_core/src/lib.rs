//! # staffbook_core
//!
//! Core domain logic for Staffbook: the sealed session cookie codec,
//! credential handling, and the persistence gateway over PostgreSQL.

pub mod auth;
pub mod contacts;
pub mod migrate;
pub mod models;
pub mod profile;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
