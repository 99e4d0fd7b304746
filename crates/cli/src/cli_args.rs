use crate::utils::{parse_kv, parse_lock_mode};
use clap::{Parser, Subcommand};
use orderup_ledger::LockMode;
use orderup_tools::ServerKind;
use serde_json::Value;
use std::path::PathBuf;

/// Command line arguments for the order-up tool servers
#[derive(Parser, Debug)]
#[clap(
    name = "orderup",
    about = "Shared restaurant ledgers served as JSON-RPC tools",
    version
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./orderup.toml, then the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the ledger and catalog files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Write locking: `exclusive` or `none`
    #[arg(long, global = true, value_parser = parse_lock_mode)]
    pub lock_mode: Option<LockMode>,

    /// Log every request/response pair into this directory
    #[arg(long, global = true)]
    pub traffic_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve one tool set over stdin/stdout, one JSON-RPC message per line
    Serve {
        /// pantry, orders, order-up, menu or recipes
        kind: ServerKind,
    },
    /// Run a single tool call and print its result
    Call {
        kind: ServerKind,
        tool: String,

        /// Argument as KEY=VALUE; VALUE is parsed as JSON when possible
        #[arg(short = 'a', long = "arg", value_parser = parse_kv, action = clap::ArgAction::Append)]
        args: Vec<(String, Value)>,

        /// Arguments as one JSON object; `--arg` values override its keys
        #[arg(long)]
        json: Option<String>,
    },
    /// List the tools a server offers
    Tools { kind: ServerKind },
    /// Write the demo pantry, food, menu and recipe files into the data directory
    Init {
        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },
}
