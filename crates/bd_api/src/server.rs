//! HTTP 服务器

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;

use bd_core::{BrainDashError, Result};

use crate::routes::{build_router, AppState};

/// API 服务器
pub struct ApiServer {
    addr: SocketAddr,
    state: AppState,
}

impl ApiServer {
    /// 创建新服务器
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// 构建 Axum 路由
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// 启动服务器，直到 `shutdown` 完成
    pub async fn start<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.build_router();
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| BrainDashError::Config(format!("bind {}: {e}", self.addr)))?;

        tracing::info!(addr = %self.addr, "Brain Dashboard API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("API server stopped");
        Ok(())
    }

    /// 监听地址
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}
