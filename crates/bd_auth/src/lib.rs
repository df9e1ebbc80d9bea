//! # bd_auth - Brain Dashboard Identity Service
//!
//! 身份服务：账户注册与登录、JWT 签发与校验。
//! 只对外暴露调用者身份 [`bd_core::Identity`]，凭据从不离开本 crate。

pub mod password;
pub mod service;
pub mod token;

pub use service::{AuthResponse, AuthService};
pub use token::{bearer_token, TokenConfig, TokenIssuer};
