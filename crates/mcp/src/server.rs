//! Stdio server loop (read requests, dispatch, write replies).

use std::future::Future;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{Error, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};

/// Trait for tool execution backends.
///
/// Implementations provide tool definitions and execute tool calls.
/// This is the boundary between the protocol loop and the tools themselves.
pub trait ToolHandler: Send + Sync {
    /// Get the tool definitions advertised by tools/list.
    fn tools(&self) -> Vec<Tool>;

    /// Execute a tool call.
    ///
    /// Returning `Error::ToolNotFound` surfaces as a protocol-level error;
    /// every other outcome must be expressed in the `CallToolResult`.
    fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> impl Future<Output = Result<CallToolResult>> + Send;
}

/// MCP server over stdin/stdout.
///
/// Requests are processed one at a time, in arrival order. Logs go to
/// stderr; stdout carries only protocol messages.
pub struct Server<H> {
    info: ServerInfo,
    handler: H,
}

impl<H: ToolHandler> Server<H> {
    pub fn new(name: impl Into<String>, version: impl Into<String>, handler: H) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            handler,
        }
    }

    /// Run the server until stdin closes.
    pub async fn run(self) -> Result<()> {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        tracing::info!(server = %self.info.name, "listening on stdio");

        loop {
            line.clear();
            if stdin.read_line(&mut line).await? == 0 {
                break;
            }
            let message = line.trim();
            if message.is_empty() {
                continue;
            }

            if let Some(reply) = self.handle_message(message).await? {
                stdout.write_all(reply.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single message; `None` means no reply (notification).
    pub async fn handle_message(&self, message: &str) -> Result<Option<String>> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                let response =
                    JsonRpcResponse::error(None, PARSE_ERROR, format!("parse error: {e}"));
                return Ok(Some(serde_json::to_string(&response)?));
            }
        };

        tracing::debug!(method = %request.method, "request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" | "notifications/initialized" => return Ok(None),
            "tools/list" => self.handle_tools_list(request)?,
            "tools/call" => self.handle_tools_call(request).await?,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("method not found: {}", request.method),
            ),
        };

        Ok(Some(serde_json::to_string(&response)?))
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(request.id, INTERNAL_ERROR, e.to_string()),
        }
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let result = ListToolsResult {
            tools: self.handler.tools(),
        };
        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    async fn handle_tools_call(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let params: CallToolParams = match serde_json::from_value(request.params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("invalid params: {e}"),
                ));
            }
        };

        match self.handler.call_tool(&params.name, params.arguments).await {
            Ok(result) => Ok(JsonRpcResponse::success(
                request.id,
                serde_json::to_value(result)?,
            )),
            Err(Error::ToolNotFound(name)) => Ok(JsonRpcResponse::error(
                request.id,
                INVALID_PARAMS,
                format!("tool not found: {name}"),
            )),
            Err(e) => Ok(JsonRpcResponse::error(
                request.id,
                INTERNAL_ERROR,
                e.to_string(),
            )),
        }
    }
}
