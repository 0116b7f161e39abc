//! Core module containing shared infrastructure components.
//!
//! Configuration, the umbrella error type, the shared upstream services,
//! server lifecycle and the transport layer.

pub mod config;
pub mod error;
pub mod server;
pub mod services;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use services::Services;
pub use transport::{TransportConfig, TransportService};
