//! Errors raised by the upstream clients.

use thiserror::Error;

/// Result type for upstream client calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a single outbound call.
///
/// Every variant carries enough text to be shown to an MCP client as-is;
/// the tools domain decides which category each one falls into.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status without an error object in the body.
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// Explicit error object in the upstream JSON.
    #[error("{service} error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },

    /// The response did not match the declared schema.
    #[error("Unexpected {service} response: {detail}")]
    Decode {
        service: &'static str,
        detail: String,
    },

    /// The referenced resource does not exist upstream.
    #[error("{0}")]
    NotFound(String),

    /// No usable caption track for the video.
    #[error("Could not retrieve a transcript for the video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    /// The model answered with no text.
    #[error("No {0} generated - empty response from model")]
    EmptyGeneration(&'static str),
}

impl ClientError {
    /// Create an API error from an upstream error object.
    pub fn api(service: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            service,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(service: &'static str, detail: impl ToString) -> Self {
        Self::Decode {
            service,
            detail: detail.to_string(),
        }
    }

    /// Create a "transcript unavailable" error.
    pub fn transcript_unavailable(video_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TranscriptUnavailable {
            video_id: video_id.into(),
            reason: reason.into(),
        }
    }
}
