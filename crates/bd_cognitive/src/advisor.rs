//! 建议日志生成
//!
//! 统计计算完成后按固定顺序评估七组规则：睡眠、学习、咖啡、压力、Bug 数、
//! 大脑内存、专注度总结。每组自上而下取第一个命中的区间，最多产出一条；
//! 没有命中的组保持沉默。

use bd_core::{Inputs, LogEntry, LogGroup, Stats};

/// 生成建议日志，顺序即发射顺序
pub fn advise(inputs: &Inputs, stats: &Stats) -> Vec<LogEntry> {
    [
        sleep(inputs.sleep_hours),
        study(inputs.study_hours),
        coffee(inputs.coffee_intake),
        stress(inputs.stress_level),
        bugs(stats.bug_count),
        brain_ram(stats.brain_ram_usage),
        focus(stats.focus_level),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn sleep(hours: f64) -> Option<LogEntry> {
    let group = LogGroup::Sleep;
    if hours < 6.0 {
        Some(LogEntry::error(
            group,
            "CRITICAL: Sleep deprivation detected",
            format!("{hours} hrs sleep - Brain fog, mistakes, stress. Get 7-8 hours tonight!"),
        ))
    } else if (6.0..7.0).contains(&hours) {
        Some(LogEntry::warning(
            group,
            "WARNING: Sleep below optimal",
            format!("{hours} hrs - Focus is okay but not peak. Aim for 7-8 hours."),
        ))
    } else if hours > 9.0 {
        Some(LogEntry::warning(
            group,
            "INFO: Oversleep detected",
            format!("{hours} hrs - May cause laziness and low alertness."),
        ))
    } else if (7.0..=8.0).contains(&hours) {
        Some(LogEntry::info(
            group,
            "OPTIMAL: Perfect sleep duration",
            format!("{hours} hrs - Best focus and cognitive performance!"),
        ))
    } else {
        None
    }
}

fn study(hours: f64) -> Option<LogEntry> {
    let group = LogGroup::Study;
    if hours == 0.0 {
        Some(LogEntry::info(
            group,
            "IDLE: No study activity",
            "Brain is resting - ready for learning mode.",
        ))
    } else if hours > 10.0 {
        Some(LogEntry::error(
            group,
            "DANGER: Excessive study hours",
            format!("{hours} hrs - Focus drops sharply! Take long breaks."),
        ))
    } else if hours > 8.0 {
        Some(LogEntry::error(
            group,
            "BURNOUT RISK: Too much studying",
            format!("{hours} hrs - Burnout incoming! Brain needs rest."),
        ))
    } else if hours > 6.0 {
        Some(LogEntry::warning(
            group,
            "HEAVY LOAD: Long study session",
            format!("{hours} hrs - Take 15-min breaks every 90 minutes!"),
        ))
    } else if (4.0..=6.0).contains(&hours) {
        Some(LogEntry::info(
            group,
            "OPTIMAL: Perfect study duration",
            format!("{hours} hrs - Brain works best in chunks!"),
        ))
    } else if (2.0..4.0).contains(&hours) {
        Some(LogEntry::info(
            group,
            "LEARNING MODE: Light study session",
            format!("{hours} hrs - Still productive, no stress."),
        ))
    } else {
        None
    }
}

fn coffee(cups: f64) -> Option<LogEntry> {
    let group = LogGroup::Coffee;
    if cups > 5.0 {
        Some(LogEntry::error(
            group,
            "CRITICAL: Excessive caffeine",
            format!("{cups} cups - Jittery, more mistakes, poor sleep!"),
        ))
    } else if cups > 3.0 {
        Some(LogEntry::warning(
            group,
            "WARNING: Too much caffeine",
            format!("{cups} cups - Anxiety, poor sleep. Reduce to 1-2 cups."),
        ))
    } else if cups == 3.0 {
        Some(LogEntry::info(
            group,
            "INFO: Acceptable caffeine intake",
            "3 cups - Still okay, but consider reducing.",
        ))
    } else if (1.0..=2.0).contains(&cups) {
        Some(LogEntry::info(
            group,
            "IDEAL: Perfect caffeine level",
            format!("{cups} cup(s) - Boosts focus without side effects!"),
        ))
    } else {
        None
    }
}

fn stress(level: f64) -> Option<LogEntry> {
    let group = LogGroup::Stress;
    if level >= 7.0 {
        Some(LogEntry::error(
            group,
            "CRITICAL: High stress detected",
            format!("Level {level}/10 - Mistakes, panic, bad memory. Practice relaxation!"),
        ))
    } else if (5.0..=6.0).contains(&level) {
        Some(LogEntry::warning(
            group,
            "ACCEPTABLE: Moderate stress",
            format!("Level {level}/10 - Exam pressure detected. Take breaks!"),
        ))
    } else if (2.0..=4.0).contains(&level) {
        Some(LogEntry::info(
            group,
            "OPTIMAL: Healthy stress level",
            format!("Level {level}/10 - Slight pressure, clear mind, motivated!"),
        ))
    } else if level <= 1.0 {
        Some(LogEntry::warning(
            group,
            "WARNING: Too relaxed",
            format!("Level {level}/10 - Zero stress = laziness. Need some motivation!"),
        ))
    } else {
        None
    }
}

fn bugs(count: u32) -> Option<LogEntry> {
    let group = LogGroup::Bugs;
    if count > 40 {
        Some(LogEntry::error(
            group,
            "CRITICAL: Extremely high error rate",
            format!("{count} bugs - Review everything! Mental state is compromised."),
        ))
    } else if count > 25 {
        Some(LogEntry::warning(
            group,
            "WARNING: High error count",
            format!("{count} bugs - Take breaks between sessions."),
        ))
    } else if count <= 10 {
        Some(LogEntry::info(
            group,
            "EXCELLENT: Low error rate",
            format!("{count} bugs - Great accuracy! Keep it up."),
        ))
    } else {
        None
    }
}

fn brain_ram(usage: f64) -> Option<LogEntry> {
    let group = LogGroup::BrainRam;
    if usage > 3.5 {
        Some(LogEntry::error(
            group,
            "ERROR: Brain RAM overload",
            format!("{usage} GB / 4 GB - Mental capacity maxed! Stop and rest."),
        ))
    } else if usage > 2.5 {
        Some(LogEntry::warning(
            group,
            "WARNING: High mental load",
            format!("{usage} GB / 4 GB - Take breaks to prevent burnout."),
        ))
    } else if usage < 1.0 {
        Some(LogEntry::info(
            group,
            "IDLE: Low brain activity",
            format!("{usage} GB / 4 GB - Plenty of capacity available."),
        ))
    } else {
        None
    }
}

fn focus(level: f64) -> Option<LogEntry> {
    let group = LogGroup::Focus;
    if level >= 90.0 {
        Some(LogEntry::info(
            group,
            "PEAK PERFORMANCE: Maximum focus achieved",
            "You're in the zone! Perfect conditions for deep work.",
        ))
    } else if level < 50.0 {
        Some(LogEntry::error(
            group,
            "LOW PERFORMANCE: Focus critically low",
            "Cognitive performance severely impaired - address issues ASAP!",
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_core::Severity;

    #[test]
    fn test_sleep_boundaries() {
        assert_eq!(sleep(5.99).unwrap().severity, Severity::Error);
        assert_eq!(sleep(6.0).unwrap().severity, Severity::Warning);
        assert_eq!(sleep(7.0).unwrap().severity, Severity::Info);
        assert_eq!(sleep(8.0).unwrap().severity, Severity::Info);
        assert!(sleep(8.5).is_none());
        assert!(sleep(9.0).is_none());
        // 过度睡眠的消息写作 INFO，但级别是 warning
        let oversleep = sleep(9.5).unwrap();
        assert_eq!(oversleep.severity, Severity::Warning);
        assert_eq!(oversleep.message, "INFO: Oversleep detected");
    }

    #[test]
    fn test_sleep_details_interpolate_literal_value() {
        let entry = sleep(7.5).unwrap();
        assert_eq!(
            entry.details.as_deref(),
            Some("7.5 hrs - Best focus and cognitive performance!")
        );
        let entry = sleep(3.0).unwrap();
        assert!(entry.details.unwrap().starts_with("3 hrs sleep"));
    }

    #[test]
    fn test_study_boundaries() {
        assert_eq!(study(0.0).unwrap().message, "IDLE: No study activity");
        assert!(study(1.0).is_none());
        assert_eq!(study(2.0).unwrap().message, "LEARNING MODE: Light study session");
        assert_eq!(study(4.0).unwrap().message, "OPTIMAL: Perfect study duration");
        assert_eq!(study(6.0).unwrap().message, "OPTIMAL: Perfect study duration");
        assert_eq!(study(6.5).unwrap().severity, Severity::Warning);
        assert_eq!(study(10.0).unwrap().message, "BURNOUT RISK: Too much studying");
        assert_eq!(study(10.5).unwrap().message, "DANGER: Excessive study hours");
        assert!(study(-1.0).is_none());
    }

    #[test]
    fn test_coffee_boundaries() {
        assert!(coffee(0.0).is_none());
        assert!(coffee(2.5).is_none());
        assert_eq!(coffee(1.0).unwrap().message, "IDEAL: Perfect caffeine level");
        assert_eq!(coffee(3.0).unwrap().message, "INFO: Acceptable caffeine intake");
        // 4 杯落在 (3, 5] 区间
        assert_eq!(coffee(4.0).unwrap().severity, Severity::Warning);
        assert_eq!(coffee(5.0).unwrap().severity, Severity::Warning);
        assert_eq!(coffee(5.5).unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_stress_boundaries() {
        assert_eq!(stress(0.0).unwrap().message, "WARNING: Too relaxed");
        assert_eq!(stress(1.0).unwrap().message, "WARNING: Too relaxed");
        assert!(stress(1.5).is_none());
        assert_eq!(stress(2.0).unwrap().severity, Severity::Info);
        assert!(stress(4.5).is_none());
        assert_eq!(stress(6.0).unwrap().severity, Severity::Warning);
        assert!(stress(6.5).is_none());
        assert_eq!(stress(7.0).unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_stat_thresholds() {
        assert_eq!(bugs(41).unwrap().severity, Severity::Error);
        assert_eq!(bugs(40).unwrap().severity, Severity::Warning);
        assert!(bugs(25).is_none());
        assert!(bugs(11).is_none());
        assert_eq!(bugs(10).unwrap().severity, Severity::Info);

        assert_eq!(brain_ram(3.6).unwrap().severity, Severity::Error);
        assert_eq!(brain_ram(3.5).unwrap().severity, Severity::Warning);
        assert!(brain_ram(2.5).is_none());
        assert!(brain_ram(1.0).is_none());
        assert_eq!(brain_ram(0.9).unwrap().severity, Severity::Info);

        assert_eq!(focus(90.0).unwrap().severity, Severity::Info);
        assert!(focus(89.0).is_none());
        assert!(focus(50.0).is_none());
        assert_eq!(focus(49.0).unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_advise_emits_in_group_order() {
        let inputs = Inputs::new(7.5, 5.0, 2.0, 3.0);
        let stats = Stats {
            focus_level: 100.0,
            logic_power: 100.0,
            bug_count: 0,
            coffee_dependency: 25.0,
            brain_ram_usage: 1.9,
        };
        let groups: Vec<LogGroup> = advise(&inputs, &stats).iter().map(|l| l.group).collect();
        assert_eq!(
            groups,
            vec![
                LogGroup::Sleep,
                LogGroup::Study,
                LogGroup::Coffee,
                LogGroup::Stress,
                LogGroup::Bugs,
                LogGroup::Focus,
            ]
        );
    }
}
