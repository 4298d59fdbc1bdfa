use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use notes_api::config::{self, AppConfig};
use notes_api::database::{DatabaseManager, MemoryStore, PgStore, RecordStore};
use notes_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "notes-api", version, about = "Notes API server")]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (falls back to PORT, then 3000)
    #[arg(long, env = "NOTES_API_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Notes API in {:?} mode", config.environment);

    let store = build_store(config).await?;
    let app = app(AppState::new(store));

    let port = args
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3000);
    let bind_addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Notes API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Postgres when DATABASE_URL is set; the in-memory store is a development fallback only
async fn build_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    if std::env::var("DATABASE_URL").is_ok() {
        let pool = DatabaseManager::connect_from_env(&config.database)
            .await
            .context("failed to connect to database")?;
        DatabaseManager::ensure_schema(&pool)
            .await
            .context("failed to prepare database schema")?;
        return Ok(Arc::new(PgStore::new(pool)));
    }

    if notes_api::is_development!() {
        tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    anyhow::bail!("DATABASE_URL must be set outside development")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
