use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use trendgate_models::{tool_definitions, ToolCall};
use trendgate_tools::ToolError;

/// Exit status when the call's parameters are rejected.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "trendgate",
    about = "Validating gateway between LLM agents and Google Trends"
)]
struct Cli {
    /// Path to configuration file (defaults to config/trendgate.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one {"operation", "parameters"} call and print the result envelope
    Run {
        /// Read the call JSON from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print tool definitions for registering with an LLM
    Schema,
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries JSON only; logs go to stderr (respects RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match cli.command {
        Command::Schema => return print_json(&tool_definitions(), cli.pretty),
        Command::Run { input } => input,
    };

    let config = trendgate::load_config(cli.config.as_deref())?;

    let call_json = if let Some(input_path) = &input {
        std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read input: {}", input_path.display()))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    };

    let call: ToolCall = serde_json::from_str(&call_json).context("Failed to parse call JSON")?;

    let gateway = trendgate::build_gateway(&config);
    let envelope: Value = match gateway.invoke(&call).await {
        Ok(envelope) => envelope,
        Err(ToolError::Validation(e)) => {
            tracing::warn!(operation = %call.operation, error = %e, "Call rejected");
            print_json(&trendgate::rejection(&e), cli.pretty)?;
            std::process::exit(EXIT_REJECTED);
        }
        Err(e) => return Err(anyhow::anyhow!("Invocation failed: {e}")),
    };

    print_json(&envelope, cli.pretty)
}
