//! 加权规则累加器
//!
//! 每个累加器从基准值出发，按固定优先级对每个输入维度应用互斥的区间规则。
//! 区间的开闭严格按规则表；某维度没有命中任何区间时贡献为 0。
//! 累加器之间互不依赖，只读取同一份 [`Inputs`]。

use bd_core::{Inputs, Stats};

/// 专注度基准值
pub const FOCUS_BASE: f64 = 60.0;
/// 逻辑力基准值
pub const LOGIC_BASE: f64 = 40.0;
/// 大脑内存空闲占用
pub const BRAIN_RAM_BASE: f64 = 0.3;
/// 每杯咖啡的依赖度
pub const COFFEE_DEPENDENCY_PER_CUP: f64 = 12.5;

/// 将值夹到 [lo, hi]，NaN 视为下界
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// (lo, hi] 左开右闭区间
fn open_closed(value: f64, lo: f64, hi: f64) -> bool {
    value > lo && value <= hi
}

/// 专注度 [0, 100]，夹取后取整
pub fn focus_level(inputs: &Inputs) -> f64 {
    let Inputs {
        sleep_hours: sleep,
        study_hours: study,
        coffee_intake: coffee,
        stress_level: stress,
    } = *inputs;

    let mut focus = FOCUS_BASE;

    // 睡眠 (权重最大)
    focus += if (7.0..=8.0).contains(&sleep) {
        45.0
    } else if (6.0..7.0).contains(&sleep) {
        30.0
    } else if sleep < 6.0 {
        10.0 - (6.0 - sleep) * 8.0
    } else if sleep > 9.0 {
        20.0
    } else {
        35.0
    };

    // 压力: 2-4 为健康压力，0/1 过于松懈
    focus += if (2.0..=4.0).contains(&stress) {
        10.0
    } else if stress == 0.0 || stress == 1.0 {
        -15.0
    } else if (5.0..=6.0).contains(&stress) {
        -10.0
    } else if stress >= 7.0 {
        -(stress - 6.0) * 12.0
    } else {
        0.0
    };

    // 咖啡: 只有睡眠充足时才有增益
    focus += if sleep >= 6.0 {
        if (1.0..=2.0).contains(&coffee) {
            10.0
        } else if coffee == 3.0 {
            5.0
        } else if coffee > 3.0 {
            -(coffee - 3.0) * 5.0
        } else {
            0.0
        }
    } else if coffee > 3.0 {
        -(coffee - 3.0) * 3.0
    } else {
        0.0
    };

    // 学习时长
    focus += if (4.0..=6.0).contains(&study) {
        5.0
    } else if (2.0..4.0).contains(&study) {
        0.0
    } else if open_closed(study, 6.0, 8.0) {
        -5.0
    } else if open_closed(study, 8.0, 10.0) {
        -15.0
    } else if study > 10.0 {
        -25.0
    } else {
        0.0
    };

    clamp(focus, 0.0, Stats::PERCENT_MAX).round()
}

/// 逻辑力 [0, 100]，夹取后取整
pub fn logic_power(inputs: &Inputs) -> f64 {
    let Inputs {
        sleep_hours: sleep,
        study_hours: study,
        stress_level: stress,
        ..
    } = *inputs;

    let mut logic = LOGIC_BASE;

    logic += if (4.0..=6.0).contains(&study) {
        40.0
    } else if (2.0..4.0).contains(&study) {
        25.0
    } else if open_closed(study, 6.0, 8.0) {
        30.0
    } else if study > 8.0 {
        20.0 - (study - 8.0) * 5.0
    } else if study == 0.0 {
        0.0
    } else {
        study * 8.0
    };

    logic += if (7.0..=8.0).contains(&sleep) {
        20.0
    } else if (6.0..7.0).contains(&sleep) {
        10.0
    } else if sleep < 6.0 {
        -20.0
    } else {
        0.0
    };

    logic += if (2.0..=4.0).contains(&stress) {
        5.0
    } else if stress >= 7.0 {
        -(stress - 6.0) * 8.0
    } else {
        0.0
    };

    clamp(logic, 0.0, Stats::PERCENT_MAX).round()
}

/// Bug 数：各维度贡献相加，末尾只取整一次
pub fn bug_count(inputs: &Inputs) -> u32 {
    let Inputs {
        sleep_hours: sleep,
        study_hours: study,
        coffee_intake: coffee,
        stress_level: stress,
    } = *inputs;

    let mut bugs = 0.0;

    if sleep < 6.0 {
        bugs += (6.0 - sleep) * 8.0;
    } else if sleep > 9.0 {
        bugs += 5.0;
    }

    if stress >= 7.0 {
        bugs += (stress - 6.0) * 6.0;
    } else if (5.0..=6.0).contains(&stress) {
        bugs += (stress - 4.0) * 3.0;
    } else if stress <= 1.0 {
        bugs += 5.0;
    }

    if study > 8.0 {
        bugs += (study - 8.0) * 4.0;
    }

    if coffee > 3.0 {
        bugs += (coffee - 3.0) * 3.0;
    }

    // f64 -> u32 的 as 转换是饱和的，NaN 落到 0
    clamp(bugs, 0.0, f64::INFINITY).round() as u32
}

/// 咖啡依赖度 = min(100, 杯数 × 12.5)
pub fn coffee_dependency(inputs: &Inputs) -> f64 {
    clamp(
        inputs.coffee_intake * COFFEE_DEPENDENCY_PER_CUP,
        0.0,
        Stats::PERCENT_MAX,
    )
}

/// 大脑内存占用 [0.0, 4.0]，保留一位小数
pub fn brain_ram_usage(inputs: &Inputs) -> f64 {
    let Inputs {
        sleep_hours: sleep,
        study_hours: study,
        coffee_intake: coffee,
        stress_level: stress,
    } = *inputs;

    let mut ram = BRAIN_RAM_BASE;

    // 学习 (主导)
    ram += if study == 0.0 {
        0.0
    } else if (2.0..4.0).contains(&study) {
        0.8
    } else if (4.0..=6.0).contains(&study) {
        1.5
    } else if open_closed(study, 6.0, 8.0) {
        2.2
    } else if study > 8.0 {
        2.8 + (study - 8.0) * 0.2
    } else {
        study * 0.4
    };

    // 压力 (中等)
    ram += if stress >= 7.0 {
        (stress - 6.0) * 0.3
    } else if (5.0..=6.0).contains(&stress) {
        0.3
    } else if (2.0..=4.0).contains(&stress) {
        0.1
    } else {
        0.0
    };

    // 睡眠与咖啡 (次要)
    if sleep < 6.0 {
        ram += 0.3;
    }
    if coffee > 4.0 {
        ram += 0.2;
    }

    round_tenths(clamp(ram, 0.0, Stats::BRAIN_RAM_MAX))
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
