//! Staffbook web server binary.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use staffbook_web::config::AppConfig;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "staffbook_server", about = "Staffbook web server")]
struct Args {
    /// Address to bind, overriding `BIND_ADDR`.
    #[arg(long)]
    bind: Option<String>,

    /// Maximum number of database connections in the pool.
    ///
    /// Acquisition is bounded: a request that cannot get a connection
    /// within the acquire timeout fails as retryable instead of hanging.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,staffbook_web=debug,staffbook_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    // Configuration errors (a missing SESSION_SECRET in particular) are
    // fatal here, never deferred to request time.
    let mut config = AppConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    info!(
        database_url = %config.database_url,
        max_connections = args.max_connections,
        "starting staffbook_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    staffbook_web::migrate(&pool).await?;

    let state = staffbook_web::AppState::new(pool.clone(), config.clone());
    let app = staffbook_web::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit pool teardown: drain connections before exit.
    pool.close().await;
    info!("shut down");

    Ok(())
}

/// Resolves on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
