use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use orderup_tools::{Config, ToolServer, resolve_config};

mod cli_args;
mod demo_data;
mod tracing;
mod utils;

use crate::tracing::setup_logging;
use cli_args::{CliArgs, Commands};
use utils::build_arguments;

/// Resolve the config file, then apply command line overrides on top.
async fn load_settings(args: &CliArgs) -> Result<Config> {
    let mut config = resolve_config(args.config.as_deref()).await?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(mode) = args.lock_mode {
        config.lock_mode = mode;
    }
    if let Some(dir) = &args.traffic_dir {
        config.traffic_dir = Some(dir.clone());
    }
    Ok(config)
}

fn print_tools(server: &ToolServer) {
    println!(
        "{} {} tools",
        server.kind().to_string().bright_cyan().bold(),
        server.registry().len()
    );
    for def in server.registry().definitions() {
        println!(
            "  {} - {}",
            def.function.name.bright_green().bold(),
            def.function.description
        );
        let params = def
            .function
            .parameters
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|props| props.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        if !params.is_empty() {
            println!("      {} {}", "args:".dimmed(), params.join(", "));
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = load_settings(&args).await?;

    match args.command {
        Commands::Serve { kind } => {
            let server = ToolServer::from_config(&config, kind);
            server
                .run_stdio()
                .await
                .with_context(|| format!("{} server stopped on an I/O error", kind))?;
        }
        Commands::Call {
            kind,
            tool,
            args: pairs,
            json,
        } => {
            let arguments = build_arguments(json.as_deref(), &pairs)?;
            let server = ToolServer::from_config(&config, kind);
            let result = server.call_tool(&tool, arguments).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Tools { kind } => {
            print_tools(&ToolServer::from_config(&config, kind));
        }
        Commands::Init { force } => {
            let written = demo_data::write_demo_data(&config, force).await?;
            for path in &written {
                println!("{} wrote {}", "✓".bright_green(), path.display());
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let provider = setup_logging()?;
    let args = CliArgs::parse();

    let outcome = run(args).await;

    if let Some(provider) = provider
        && let Err(e) = provider.shutdown()
    {
        eprintln!("{} failed to flush traces: {}", "!".bright_yellow(), e);
    }
    outcome
}
