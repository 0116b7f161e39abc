//! Tool-specific error types.
//!
//! Every failure inside a tool is reduced to a [`ToolErrorKind`] and tagged
//! with the [`Operation`] that raised it. The pair is the only error a tool
//! invocation can produce.

use std::fmt;

use thiserror::Error;

use crate::clients::ClientError;
use crate::core::services::Credential;

/// Category of a tool failure.
#[derive(Debug, Error)]
pub enum ToolErrorKind {
    /// A required API key is not configured.
    #[error("{0} environment variable is not set")]
    ConfigMissing(Credential),

    /// Upstream answered with an error status, an error object or an
    /// unexpected payload.
    #[error("{0}")]
    Upstream(String),

    /// No usable transcript for the video.
    #[error("{0}")]
    TranscriptUnavailable(String),

    /// The model produced no text.
    #[error("{0}")]
    GenerationEmpty(String),

    /// The referenced video does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Anything else, including transport failures.
    #[error("{0}")]
    Unknown(String),

    /// The arguments did not match the tool's parameter schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolErrorKind {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Short category name, used in logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigMissing(_) => "ConfigMissing",
            Self::Upstream(_) => "UpstreamError",
            Self::TranscriptUnavailable(_) => "TranscriptUnavailable",
            Self::GenerationEmpty(_) => "GenerationEmpty",
            Self::NotFound(_) => "NotFound",
            Self::Unknown(_) => "Unknown",
            Self::InvalidArguments(_) => "InvalidArguments",
            Self::UnknownTool(_) => "UnknownTool",
        }
    }
}

impl From<Credential> for ToolErrorKind {
    fn from(credential: Credential) -> Self {
        Self::ConfigMissing(credential)
    }
}

impl From<ClientError> for ToolErrorKind {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::Api { .. } | ClientError::Status { .. } | ClientError::Decode { .. } => {
                Self::Upstream(message)
            }
            ClientError::TranscriptUnavailable { .. } => Self::TranscriptUnavailable(message),
            ClientError::EmptyGeneration(_) => Self::GenerationEmpty(message),
            ClientError::NotFound(_) => Self::NotFound(message),
            ClientError::Http(_) => Self::Unknown(message),
        }
    }
}

/// The operation a tool error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Transcript,
    Summarization,
    Query,
    Search,
    Comments,
    Likes,
    Dispatch,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transcript => "Transcript",
            Self::Summarization => "Summarization",
            Self::Query => "Query",
            Self::Search => "Search",
            Self::Comments => "Comments",
            Self::Likes => "Likes",
            Self::Dispatch => "Dispatch",
        };
        f.write_str(name)
    }
}

/// A failed tool invocation.
#[derive(Debug, Error)]
#[error("{operation} error: {kind}")]
pub struct ToolError {
    pub operation: Operation,
    #[source]
    pub kind: ToolErrorKind,
}

impl ToolError {
    pub fn new(operation: Operation, kind: impl Into<ToolErrorKind>) -> Self {
        Self {
            operation,
            kind: kind.into(),
        }
    }

    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(Operation::Dispatch, ToolErrorKind::UnknownTool(name.into()))
    }

    /// Whether the caller sent bad arguments rather than the tool failing.
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self.kind, ToolErrorKind::InvalidArguments(_))
    }
}
