//! Tools domain module.
//!
//! The six YouTube tools exposed over MCP.
//!
//! ## Architecture
//!
//! - `definitions/` - One file per tool: parameters, output data, `run()`
//! - `handlers.rs` - The `ToolHandler` trait, envelope wrapping, error tagging
//! - `router.rs` - rmcp ToolRouter builder (STDIO transport)
//! - `registry.rs` - Name-based dispatch (tests and HTTP transport)
//! - `error.rs` - Error taxonomy and operation tags
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its name in `registry.rs`

pub mod definitions;
mod error;
pub mod handlers;
mod registry;
pub mod router;

pub use error::{Operation, ToolError, ToolErrorKind};
pub use handlers::{ResponseEnvelope, ToolHandler};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
