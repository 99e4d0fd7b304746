pub mod builtins;
pub mod context;
pub mod context_impl;
pub mod registry;

pub use context::{FunctionTool, Tool, ToolContext, ToolDefinition, ToolError};
pub use context_impl::KitchenToolContext;
pub use registry::ToolRegistry;
