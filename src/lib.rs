//! YouTube MCP Server Library
//!
//! A Model Context Protocol server exposing YouTube video analysis: transcript
//! retrieval, AI summaries and transcript-grounded answers (Gemini), keyword
//! search, comments and like counts (YouTube Data API v3).
//!
//! # Architecture
//!
//! - **clients**: upstream collaborators (caption source, Gemini, YouTube Data API)
//! - **core**: configuration, error handling, shared services, server and transports
//! - **domains**: MCP surfaces organized by bounded contexts
//!   - **tools**: the six `youtube/*` tools
//!   - **resources**: transcript and video metadata resource templates
//!   - **prompts**: summarize and query prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use youtube_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod core;
pub mod domains;

#[cfg(test)]
mod testing;

pub use core::{Config, Error, McpServer, Result};
