// src/server/mod.rs
// Server bootstrap: database, shared state, HTTP listener

pub mod db;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::api::http_router;
use crate::config::HoneypotConfig;
use crate::forensics::InteractionStore;
use crate::state::AppState;

pub async fn run(config: &HoneypotConfig) -> Result<()> {
    let pool = db::create_pool(&config.database_url, config.sqlite_max_connections).await?;
    db::run_migrations(&pool, Path::new(&config.migrations_dir)).await?;
    info!("Schema version: {}", db::get_schema_version(&pool).await.unwrap_or(0));

    let app_state = Arc::new(AppState::from_config(config, InteractionStore::new(pool)));
    let app = http_router(app_state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Honeypot listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
