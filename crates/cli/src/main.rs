//! grok-mcp — MCP server for xAI Grok search and image tools.
//!
//! The server speaks JSON-RPC 2.0 over stdio: requests arrive on stdin,
//! replies leave on stdout, logs go to stderr. There are no flags or
//! subcommands; configuration comes from the environment:
//!
//! - `XAI_API_KEY`: upstream credential (tool calls report an error
//!   without it; the process still starts)
//! - `XAI_CHAT_MODEL`, `XAI_IMAGE_MODEL`, `XAI_API_BASE`: overrides
//! - `RUST_LOG`: log verbosity

mod error;

use clap::Parser;
use mcp::Server;
use runtime::{Config, Dispatcher};

use error::Result;

#[derive(Parser)]
#[command(name = "grok-mcp")]
#[command(about = "MCP server exposing Grok search, chat, and image tools", long_about = None)]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs must stay off stdout, which carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    let config = Config::from_env();
    if config.api_key.is_none() {
        tracing::warn!("XAI_API_KEY is not set; tool calls will report a credential error");
    }

    let dispatcher = Dispatcher::new(config.backend());
    Server::new("grok-mcp", env!("CARGO_PKG_VERSION"), dispatcher)
        .run()
        .await?;

    Ok(())
}
