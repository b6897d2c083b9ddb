use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecommerce_api::config::config;
use ecommerce_api::database::{ddl, DatabaseManager};
use ecommerce_api::{router, AppState};

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,tower_http=info";

#[derive(Parser)]
#[command(name = "ecommerce-api")]
#[command(about = "REST API for customers, accounts, products and orders")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT / SERVER_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Do not create missing tables at startup")]
    skip_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let mut config = config().clone();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.skip_schema {
        config.database.create_schema = false;
    }
    tracing::info!("Starting ecommerce API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.create_schema {
        ddl::create_tables(&pool)
            .await
            .context("failed to create database tables")?;
    }

    let app = router(AppState::new(pool.clone()), &config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
