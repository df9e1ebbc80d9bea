//! # bd_core - Brain Dashboard Core Primitives
//!
//! 核心原语层，定义输入/统计/建议日志类型、显式身份上下文与全局错误处理机制。
//! 此 crate 是整个项目的基础依赖，不依赖其他业务 crate。

pub mod error;
pub mod identity;
pub mod model;

pub use error::{BrainDashError, Result};
pub use identity::{Identity, Session, UserId};
pub use model::{Inputs, LogEntry, LogGroup, Severity, Stats};
