//! Brain Dashboard CLI - 命令行交互接口

mod command;

use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bd_cognitive::compute;
use bd_core::Inputs;

use command::{help_text, render_json, render_text, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brain_dashboard_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Brain Dashboard CLI v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut json_output = false;

    loop {
        print!("bd> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match Command::parse(&input) {
            Command::Empty => continue,
            Command::Help => println!("{}", help_text()),
            Command::Defaults => report(&Inputs::default(), json_output)?,
            Command::Calc(inputs) => report(&inputs, json_output)?,
            Command::ToggleJson => {
                json_output = !json_output;
                println!("JSON output: {}", if json_output { "on" } else { "off" });
            }
            Command::Clear => print!("\x1B[2J\x1B[1;1H"),
            Command::Quit => {
                println!("Goodbye!");
                break;
            }
            Command::Invalid(message) => println!("{message}"),
        }
    }

    Ok(())
}

fn report(inputs: &Inputs, json_output: bool) -> anyhow::Result<()> {
    let assessment = compute(inputs);
    tracing::debug!(worst = ?assessment.worst_severity(), "Assessment computed");

    if json_output {
        println!("{}", render_json(&assessment)?);
    } else {
        print!("{}", render_text(inputs, &assessment));
    }
    Ok(())
}
