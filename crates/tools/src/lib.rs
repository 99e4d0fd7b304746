//! Tool servers for the restaurant ledgers.
//!
//! Each [`ServerKind`] groups the tools one agent needs. A server process
//! builds a [`Kitchen`] from its [`Config`], registers the tools for its kind
//! and answers JSON-RPC requests on stdio.

pub mod config;
pub mod kitchen;
pub mod rpc;
pub mod server;
pub mod tools;
pub mod traffic;

pub use config::{Config, DataFiles, load_config, resolve_config};
pub use kitchen::{Kitchen, ServerKind};
pub use server::ToolServer;
pub use tools::{KitchenToolContext, Tool, ToolContext, ToolDefinition, ToolError, ToolRegistry};
pub use traffic::TrafficLog;
