//! # staffbook_web
//!
//! HTTP layer for Staffbook: router, access gate, and server-rendered
//! views.

pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod services;
pub mod views;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use staffbook_core::session::SessionCodec;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::handlers::{auth, contacts, registration};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// Application configuration.
    pub config: AppConfig,
    /// Codec sealing the `__session` cookie.
    pub codec: SessionCodec,
}

impl AppState {
    /// Build state from a pool and config, deriving the session codec
    /// from the configured secret.
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let codec = SessionCodec::new(&config.session_secret);
        Self {
            pool,
            config,
            codec,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `staffbook_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    staffbook_core::migrate::migrate(pool).await
}

/// Builds the axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(contacts::home))
        .route("/contacts", post(contacts::create))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/logout", post(auth::logout))
        .route(
            "/user/new",
            get(registration::form).post(registration::submit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
