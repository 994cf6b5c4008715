//! Placement portal server: connects the document store, ensures collections, serves the API.
//!
//! Run from repo root: `cargo run -p portal-server`

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tpo_portal::{app_router, ensure_database_exists, AppConfig, AppState, PgDocumentStore, COLLECTIONS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("tpo_portal=info,portal_server=info,tower_http=info")
            }),
        )
        .init();

    let config = AppConfig::from_env()?;
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL not set, using {}", config.effective_database_url());
    }
    let database_url = config.effective_database_url().to_string();
    ensure_database_exists(&database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&database_url)
        .await?;

    let store = PgDocumentStore::new(pool, config.schema.clone(), &database_url);
    store.ensure_collections(&COLLECTIONS).await?;
    tracing::info!(schema = %store.schema(), "collections ready");

    let addr = config.bind_addr();
    let state = AppState::new(Arc::new(store), config);
    let app = app_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("TPO Portal listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
