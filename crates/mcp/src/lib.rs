//! MCP (Model Context Protocol) server library.
//!
//! This crate hosts an MCP server over stdio: JSON-RPC 2.0 messages are
//! read line by line from stdin and replies are written to stdout. The
//! actual tools are supplied by a [`ToolHandler`] implementation.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{CallToolResult, Server, Tool, ToolHandler};
//! use serde_json::Value;
//!
//! struct Hello;
//!
//! impl ToolHandler for Hello {
//!     fn tools(&self) -> Vec<Tool> {
//!         vec![Tool {
//!             name: "hello".to_string(),
//!             description: "Say hello".to_string(),
//!             input_schema: serde_json::json!({"type": "object"}),
//!         }]
//!     }
//!
//!     async fn call_tool(&self, name: &str, _arguments: Value) -> mcp::Result<CallToolResult> {
//!         match name {
//!             "hello" => Ok(CallToolResult::text("hi")),
//!             other => Err(mcp::Error::ToolNotFound(other.to_string())),
//!         }
//!     }
//! }
//!
//! # async fn example() -> mcp::Result<()> {
//! Server::new("hello-server", "0.1.0", Hello).run().await
//! # }
//! ```

mod error;
mod protocol;
mod server;

pub use error::{Error, Result};
pub use protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, InitializeResult,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION, RequestId, ServerCapabilities, ServerInfo, Tool, ToolContent,
    ToolsCapability,
};
pub use server::{Server, ToolHandler};
