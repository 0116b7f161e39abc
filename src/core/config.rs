//! Configuration management for the MCP server.
//!
//! Everything is read once at startup from the process environment (after
//! loading `.env`). Missing API keys are not an error here; the tools that
//! need them report it when invoked.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials.
    pub credentials: CredentialsConfig,

    /// Base URLs of the upstream services.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// API keys for the upstream services.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Gemini key, used by summarization and question answering.
    pub gemini_api_key: Option<String>,

    /// YouTube Data API v3 key, used by search, comments and likes.
    pub youtube_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Upstream base URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// YouTube Data API v3 root.
    pub youtube_api_url: String,

    /// Generative Language API root.
    pub gemini_api_url: String,

    /// Public site, used to read watch pages for captions.
    pub youtube_web_url: String,
}

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_YOUTUBE_WEB_URL: &str = "https://www.youtube.com";

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            youtube_web_url: DEFAULT_YOUTUBE_WEB_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "youtube-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

/// Read a variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix. The API keys keep their
    /// conventional names, `GEMINI_API_KEY` and `YOUTUBE_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = non_empty_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = non_empty_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(timestamps) = non_empty_var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.parse().unwrap_or(true);
        }

        config.transport = TransportConfig::from_env();

        config.credentials.gemini_api_key = non_empty_var("GEMINI_API_KEY");
        config.credentials.youtube_api_key = non_empty_var("YOUTUBE_API_KEY");

        if let Some(url) = non_empty_var("YOUTUBE_API_URL") {
            config.upstream.youtube_api_url = url;
        }
        if let Some(url) = non_empty_var("GEMINI_API_URL") {
            config.upstream.gemini_api_url = url;
        }
        if let Some(url) = non_empty_var("YOUTUBE_WEB_URL") {
            config.upstream.youtube_web_url = url;
        }

        config
    }

    /// Configuration pointing every upstream at `base_url`, with both keys set.
    #[cfg(test)]
    pub(crate) fn for_mock_server(base_url: &str) -> Self {
        let mut config = Self::default();
        config.credentials = CredentialsConfig {
            gemini_api_key: Some("test-gemini-key".to_string()),
            youtube_api_key: Some("test-youtube-key".to_string()),
        };
        config.upstream = UpstreamConfig {
            youtube_api_url: base_url.to_string(),
            gemini_api_url: base_url.to_string(),
            youtube_web_url: base_url.to_string(),
        };
        config
    }
}
