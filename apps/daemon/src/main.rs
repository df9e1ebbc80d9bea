//! Brain Dashboard Daemon - HTTP API 后台进程

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bd_api::{ApiServer, AppState, ServerConfig};
use bd_auth::{AuthService, TokenIssuer};
use bd_durable::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "brain_dashboard_daemon=debug,bd_api=debug,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Brain Dashboard Daemon starting...");

    let config = ServerConfig::from_env()?;

    // 初始化存储
    let store = SqliteStore::open(&config.store).await?;
    tracing::info!("Stats store initialized");

    // 初始化身份服务
    let auth = AuthService::new(
        Arc::new(store.clone()),
        TokenIssuer::new(config.token.clone()),
    );
    tracing::info!(ttl_hours = config.token.ttl.num_hours(), "Auth service initialized");

    let state = AppState::new(Arc::new(store.clone()), Arc::new(auth));
    let server = ApiServer::new(config.addr, state);

    tracing::info!("Press Ctrl+C to shutdown...");
    server.start(shutdown_signal()).await?;

    store.close().await;
    tracing::info!("Shutting down...");

    Ok(())
}

/// 等待 Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
