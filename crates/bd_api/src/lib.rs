//! # bd_api - Brain Dashboard HTTP API
//!
//! Axum 路由层：健康检查、注册/登录、按身份读写统计记录，以及调用认知引擎的计算接口。

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{build_router, AppState};
pub use server::ApiServer;
