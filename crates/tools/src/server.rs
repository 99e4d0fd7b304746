//! Line-delimited JSON-RPC 2.0 server hosting one kind's tools.
//!
//! One request per input line, one response per output line. Requests are
//! handled strictly in order. Logs never go to the output stream.

use serde_json::{Value, json};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::kitchen::{Kitchen, ServerKind};
use crate::rpc::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, ToolsCallParams,
};
use crate::tools::{KitchenToolContext, ToolError, ToolRegistry};
use crate::traffic::TrafficLog;

pub struct ToolServer {
    kind: ServerKind,
    registry: ToolRegistry,
    context: KitchenToolContext,
    traffic: Option<TrafficLog>,
}

impl ToolServer {
    pub fn new(kind: ServerKind, kitchen: Arc<Kitchen>) -> Self {
        Self {
            kind,
            registry: kind.registry(),
            context: KitchenToolContext::new(kind, kitchen),
            traffic: None,
        }
    }

    /// Open the kitchen described by `config` and attach its traffic log.
    pub fn from_config(config: &Config, kind: ServerKind) -> Self {
        let server = Self::new(kind, Arc::new(Kitchen::open(config, kind)));
        match &config.traffic_dir {
            Some(dir) => server.with_traffic_log(TrafficLog::new(dir, kind.as_str())),
            None => server,
        }
    }

    pub fn with_traffic_log(mut self, log: TrafficLog) -> Self {
        self.traffic = Some(log);
        self
    }

    pub fn kind(&self) -> ServerKind {
        self.kind
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool by name.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .registry
            .find(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tracing::info!(server = %self.kind, tool = name, "tool call");
        let result = tool.call(args, &self.context).await;
        if let Err(e) = &result {
            tracing::warn!(server = %self.kind, tool = name, error = %e, "tool call rejected");
        }
        result
    }

    /// Handle one raw input line; `None` means nothing should be written back.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(server = %self.kind, error = %e, "unparsable request line");
                let response = JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                );
                return serde_json::to_string(&response).ok();
            }
        };

        let response = self.handle(raw.clone()).await;

        if let Some(log) = &self.traffic {
            let logged = response
                .as_ref()
                .and_then(|r| serde_json::to_value(r).ok())
                .unwrap_or(Value::Null);
            log.record(&raw, &logged).await;
        }

        response.and_then(|r| serde_json::to_string(&r).ok())
    }

    /// Handle one decoded message; notifications produce no response.
    pub async fn handle(&self, raw: Value) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        let outcome = self.dispatch(&request.method, request.params).await;
        let Some(id) = request.id else {
            if let Err(e) = outcome {
                tracing::debug!(method = %request.method, error = %e.message, "notification failed");
            }
            return None;
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => Ok(json!({
                "serverInfo": {
                    "name": format!("orderup-{}", self.kind),
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "capabilities": {
                    "tools": { "listChanged": false },
                },
            })),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => {
                let params: ToolsCallParams = params
                    .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "missing params"))
                    .and_then(|p| {
                        serde_json::from_value(p).map_err(|e| {
                            JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e))
                        })
                    })?;
                self.call_tool(&params.name, params.arguments)
                    .await
                    .map_err(|e| rpc_error(&e))
            }
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    /// Serve requests from `reader` until end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(server = %self.kind, tools = self.registry.len(), "tool server ready");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        tracing::info!(server = %self.kind, "input closed, shutting down");
        Ok(())
    }

    pub async fn run_stdio(&self) -> io::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

fn rpc_error(error: &ToolError) -> JsonRpcError {
    let code = match error {
        ToolError::InvalidRequest(_) | ToolError::UnknownTool(_) => INVALID_PARAMS,
        ToolError::Serialization(_) | ToolError::Other(_) => INTERNAL_ERROR,
    };
    JsonRpcError::new(code, error.to_string())
}
