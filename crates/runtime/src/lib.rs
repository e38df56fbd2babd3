//! Grok tool runtime — registry, dispatch, and upstream API access.
//!
//! This crate holds everything behind the MCP boundary:
//!
//! - **Registry**: the fixed tool descriptors advertised to the host.
//! - **Dispatcher**: validates arguments, calls the upstream xAI API, and
//!   shapes every outcome into a single [`ToolReply`].
//! - **Image normalizer**: reduces a file path, URL, or base64 payload to
//!   a `data:` URI with a detected MIME type.
//!
//! # Example
//!
//! ```no_run
//! use runtime::{Config, Dispatcher};
//!
//! # async fn example() -> mcp::Result<()> {
//! let config = Config::from_env();
//! let dispatcher = Dispatcher::new(config.backend());
//! mcp::Server::new("grok-mcp", env!("CARGO_PKG_VERSION"), dispatcher)
//!     .run()
//!     .await
//! # }
//! ```

pub mod api;
mod config;
mod error;
pub mod image;
mod tools;

pub use api::{ApiError, Backend, ChatRequest, GeneratedImage, ImageRequest, SearchCapability, XaiBackend};
pub use config::Config;
pub use error::{Error, Result};
pub use image::{ImageSource, NormalizedImage, detect_mime_type, normalize};
pub use tools::{Dispatcher, ToolReply, tool_descriptors};
