//! Tool trait, call context and error type shared by every tool server

use async_trait::async_trait;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::kitchen::Kitchen;

/// Errors for calls that could not be executed at all.
///
/// A call that reaches the ledger and is refused there (unknown order,
/// insufficient stock) is not an error at this level; tools report those as
/// `{"success": false, ...}` payloads.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Function description of a tool, in the shape LLM tool-use APIs expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTool {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionTool,
}

impl ToolDefinition {
    /// Function tool whose parameter schema is derived from `A`.
    pub fn function<A: JsonSchema>(name: &str, description: &str) -> Self {
        let parameters =
            serde_json::to_value(schema_for!(A)).unwrap_or_else(|_| json!({"type": "object"}));
        Self {
            tool_type: "function".to_string(),
            function: FunctionTool {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

/// What a tool can reach while it runs.
pub trait ToolContext: Send + Sync {
    /// Name of the server handling the call, for logs.
    fn server_name(&self) -> &str;

    fn kitchen(&self) -> &Kitchen;
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    /// Execute the tool. `args` is the JSON arguments object (or `null`).
    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError>;
}
