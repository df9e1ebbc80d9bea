//! 命令解析与输出渲染

use bd_cognitive::Assessment;
use bd_core::{Inputs, Severity};

pub const CALC_USAGE: &str = "Usage: calc <sleep> <study> <coffee> <stress>";

/// REPL 命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Defaults,
    Calc(Inputs),
    ToggleJson,
    Clear,
    Quit,
    Empty,
    Invalid(String),
}

impl Command {
    /// 解析一行输入
    pub fn parse(line: &str) -> Self {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Command::Empty;
        };

        match command {
            "help" => Command::Help,
            "defaults" => Command::Defaults,
            "calc" => match parse_inputs(args) {
                Ok(inputs) => Command::Calc(inputs),
                Err(message) => Command::Invalid(message),
            },
            "json" => Command::ToggleJson,
            "clear" => Command::Clear,
            "quit" | "exit" => Command::Quit,
            other => Command::Invalid(format!(
                "Unknown command: {other}\nType 'help' for available commands."
            )),
        }
    }
}

fn parse_inputs(args: &[&str]) -> Result<Inputs, String> {
    let [sleep, study, coffee, stress] = args else {
        return Err(CALC_USAGE.to_string());
    };

    let number = |name: &str, raw: &str| -> Result<f64, String> {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("Invalid {name}: {raw}\n{CALC_USAGE}"))
    };

    Ok(Inputs::new(
        number("sleep", sleep)?,
        number("study", study)?,
        number("coffee", coffee)?,
        number("stress", stress)?,
    ))
}

pub fn help_text() -> &'static str {
    "Available commands:
  help                                  - Show this help message
  defaults                              - Calculate with the default inputs
  calc <sleep> <study> <coffee> <stress> - Calculate brain stats
  json                                  - Toggle JSON output
  clear                                 - Clear the screen
  quit / exit                           - Exit the CLI"
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[INFO]",
        Severity::Warning => "[WARN]",
        Severity::Error => "[ERR ]",
    }
}

/// 文本报告
pub fn render_text(inputs: &Inputs, assessment: &Assessment) -> String {
    let stats = &assessment.stats;

    let logs: String = assessment
        .logs
        .iter()
        .map(|log| {
            let details = log
                .details
                .as_deref()
                .map(|details| format!(" ({details})"))
                .unwrap_or_default();
            format!("  {} {}{details}\n", severity_tag(log.severity), log.message)
        })
        .collect();

    format!(
        "Inputs: sleep {}h, study {}h, coffee {} cups, stress {}/10\n\
         Stats:\n\
         \x20 Focus Level       {:>6.1}%\n\
         \x20 Logic Power       {:>6.1}%\n\
         \x20 Bug Count         {:>6}\n\
         \x20 Coffee Dependency {:>6.1}%\n\
         \x20 Brain RAM Usage   {:>6.1} GB\n\
         System Log:\n\
         {logs}",
        inputs.sleep_hours,
        inputs.study_hours,
        inputs.coffee_intake,
        inputs.stress_level,
        stats.focus_level,
        stats.logic_power,
        stats.bug_count,
        stats.coffee_dependency,
        stats.brain_ram_usage,
    )
}

/// JSON 报告
pub fn render_json(assessment: &Assessment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_cognitive::compute;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("defaults"), Command::Defaults);
        assert_eq!(Command::parse("json"), Command::ToggleJson);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(
            Command::parse("calc 7.5 5 2 3"),
            Command::Calc(Inputs::new(7.5, 5.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_parse_calc_errors() {
        assert_eq!(Command::parse("calc 7 5"), Command::Invalid(CALC_USAGE.to_string()));
        assert!(matches!(
            Command::parse("calc 7 five 2 3"),
            Command::Invalid(msg) if msg.contains("study")
        ));
        assert!(matches!(Command::parse("calc 7 5 inf 3"), Command::Invalid(_)));
        assert!(matches!(
            Command::parse("status"),
            Command::Invalid(msg) if msg.contains("status")
        ));
    }

    #[test]
    fn test_render_text() {
        let inputs = Inputs::new(7.5, 5.0, 2.0, 3.0);
        let text = render_text(&inputs, &compute(&inputs));
        assert!(text.contains("Focus Level        100.0%"));
        assert!(text.contains("Brain RAM Usage      1.9 GB"));
        assert!(text.contains("PEAK PERFORMANCE"));
        assert!(!text.contains("[ERR ]"));
        let header = "Inputs: sleep 7.5h, study 5h, coffee 2 cups, stress 3/10\nStats:\n";
        assert!(text.starts_with(header));
        assert!(text.ends_with(")\n"));
    }

    #[test]
    fn test_render_json() {
        let assessment = compute(&Inputs::default());
        let json = render_json(&assessment).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["stats"]["focusLevel"].is_number());
        assert!(value["logs"].is_array());
    }
}
