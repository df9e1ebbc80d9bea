//! 核心数据模型: 输入、统计与建议日志

use serde::{Deserialize, Serialize};

use crate::error::{BrainDashError, Result};

/// 用户提供的生活方式输入
///
/// 每个字段都是实数，边界处不做上限约束。引擎对任何取值都给出有效输出。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    /// 睡眠时长 (名义 0-12 小时)
    pub sleep_hours: f64,
    /// 学习/工作时长 (名义 0-24 小时)
    pub study_hours: f64,
    /// 咖啡因饮品杯数 (名义 0-10)
    pub coffee_intake: f64,
    /// 自评压力等级 (名义 0-10 整数刻度)
    pub stress_level: f64,
}

impl Inputs {
    /// 创建新的输入记录
    pub fn new(sleep_hours: f64, study_hours: f64, coffee_intake: f64, stress_level: f64) -> Self {
        Self {
            sleep_hours,
            study_hours,
            coffee_intake,
            stress_level,
        }
    }

    /// 所有字段均为有限数值
    pub fn is_finite(&self) -> bool {
        self.sleep_hours.is_finite()
            && self.study_hours.is_finite()
            && self.coffee_intake.is_finite()
            && self.stress_level.is_finite()
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self::new(7.0, 4.0, 2.0, 5.0)
    }
}

/// 引擎派生的五项统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// 专注度 [0, 100]
    pub focus_level: f64,
    /// 逻辑力 [0, 100]
    pub logic_power: f64,
    /// Bug 数 (非负整数)
    pub bug_count: u32,
    /// 咖啡依赖度 [0, 100]
    pub coffee_dependency: f64,
    /// 大脑内存占用 [0.0, 4.0] GB
    pub brain_ram_usage: f64,
}

impl Stats {
    /// 百分比类字段上限
    pub const PERCENT_MAX: f64 = 100.0;
    /// 大脑内存上限 (GB)
    pub const BRAIN_RAM_MAX: f64 = 4.0;

    /// 校验持久化记录的取值范围
    pub fn validate(&self) -> Result<()> {
        let percent = |name: &str, value: f64| {
            if (0.0..=Self::PERCENT_MAX).contains(&value) {
                Ok(())
            } else {
                Err(BrainDashError::InvalidInput(format!(
                    "{name} must be within 0-100, got {value}"
                )))
            }
        };

        percent("focusLevel", self.focus_level)?;
        percent("logicPower", self.logic_power)?;
        percent("coffeeDependency", self.coffee_dependency)?;

        if !(0.0..=Self::BRAIN_RAM_MAX).contains(&self.brain_ram_usage) {
            return Err(BrainDashError::InvalidInput(format!(
                "brainRamUsage must be within 0-4, got {}",
                self.brain_ram_usage
            )));
        }

        Ok(())
    }
}

/// 日志严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// 获取级别名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// 产生日志的规则组，按发射顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogGroup {
    Sleep,
    Study,
    Coffee,
    Stress,
    Bugs,
    BrainRam,
    Focus,
}

/// 单条建议日志
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 产生该条目的规则组
    pub group: LogGroup,
    /// 严重级别
    pub severity: Severity,
    /// 简短状态消息
    pub message: String,
    /// 带具体数值的细节
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// 创建新日志条目
    pub fn new(
        group: LogGroup,
        severity: Severity,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            group,
            severity,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn info(group: LogGroup, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(group, Severity::Info, message, details)
    }

    pub fn warning(
        group: LogGroup,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::new(group, Severity::Warning, message, details)
    }

    pub fn error(group: LogGroup, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(group, Severity::Error, message, details)
    }
}
