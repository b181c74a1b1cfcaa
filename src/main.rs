use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use etiquetas_api::config::AppConfig;
use etiquetas_api::database::{DatabaseManager, ProductRepository};
use etiquetas_api::{app, AppOptions, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and ADMIN_API_KEY
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("etiquetas_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Etiquetas API with {:?}", config);

    let manager = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let repository = ProductRepository::new(manager.clone());
    repository
        .ensure_collection()
        .await
        .context("failed to prepare product collection")?;

    let state = AppState::new(Arc::new(repository), config.security.admin_api_key.as_str());
    let app = app(
        state,
        AppOptions {
            enable_cors: config.security.enable_cors,
        },
    );

    let bind_addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Etiquetas API listening on http://{}", bind_addr);
    tracing::info!("Product admin endpoint: http://{}/admin/productos", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    manager.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
