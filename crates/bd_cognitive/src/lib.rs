//! # bd_cognitive - Brain Dashboard Cognitive Engine
//!
//! 认知评分引擎：四个独立的加权规则累加器 + 一个线性公式，
//! 以及按固定顺序评估的七组建议日志规则。纯函数，无状态，无 I/O。

pub mod advisor;
pub mod engine;
pub mod rules;

pub use advisor::advise;
pub use engine::{compute, Assessment};
