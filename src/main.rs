//! Productos API server: loads config from env, connects and syncs the database, serves HTTP.

use productos_api::{build_app, store, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("productos_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    store::ensure_database_exists(&config.database_url).await?;
    let pool = store::connect(&config.database_url, config.db_max_connections).await?;
    if let Err(e) = connect_db(&pool).await {
        tracing::error!(error = %e, "error connecting to the database");
        return Err(e.into());
    }
    tracing::info!("database connection established");

    let app = build_app(AppState::new(pool.clone()), &config)?;

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn connect_db(pool: &sqlx::PgPool) -> Result<(), productos_api::AppError> {
    store::authenticate(pool).await?;
    store::sync(pool).await
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
