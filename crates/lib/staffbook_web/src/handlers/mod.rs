//! Request handlers.

pub mod auth;
pub mod contacts;
pub mod registration;
