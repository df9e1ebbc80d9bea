//! 认知评分引擎入口

use serde::{Deserialize, Serialize};

use bd_core::{Inputs, LogEntry, Severity, Stats};

use crate::{advisor, rules};

/// 一次计算的结果：统计 + 建议日志
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub stats: Stats,
    pub logs: Vec<LogEntry>,
}

impl Assessment {
    /// 是否包含 error 级别日志
    pub fn has_errors(&self) -> bool {
        self.logs.iter().any(|log| log.severity == Severity::Error)
    }

    /// 最高严重级别 (无日志时为 None)
    pub fn worst_severity(&self) -> Option<Severity> {
        self.logs.iter().map(|log| log.severity).max()
    }
}

/// 计算统计与建议日志
///
/// 对任何数值输入都不会失败：越界值按同样的算术处理，末尾统一夹取。
pub fn compute(inputs: &Inputs) -> Assessment {
    let stats = Stats {
        focus_level: rules::focus_level(inputs),
        logic_power: rules::logic_power(inputs),
        bug_count: rules::bug_count(inputs),
        coffee_dependency: rules::coffee_dependency(inputs),
        brain_ram_usage: rules::brain_ram_usage(inputs),
    };
    let logs = advisor::advise(inputs, &stats);

    tracing::debug!(
        focus = stats.focus_level,
        logic = stats.logic_power,
        bugs = stats.bug_count,
        ram = stats.brain_ram_usage,
        logs = logs.len(),
        "Cognitive stats computed"
    );

    Assessment { stats, logs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_deterministic() {
        let inputs = Inputs::new(6.3, 7.7, 3.2, 5.5);
        assert_eq!(compute(&inputs), compute(&inputs));
    }

    #[test]
    fn test_worst_severity() {
        let calm = compute(&Inputs::new(7.5, 5.0, 2.0, 3.0));
        assert_eq!(calm.worst_severity(), Some(Severity::Info));
        assert!(!calm.has_errors());

        let rough = compute(&Inputs::new(3.0, 10.0, 5.0, 9.0));
        assert_eq!(rough.worst_severity(), Some(Severity::Error));
    }
}
