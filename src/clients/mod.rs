//! Upstream clients.
//!
//! - [`transcript`]: caption retrieval from the public watch page
//! - [`gemini`]: text generation for summaries and grounded answers
//! - [`youtube_data`]: YouTube Data API v3 (search, videos, comments)
//!
//! None of these know about MCP. They return [`ClientError`] and leave the
//! user-facing categorization to the tools domain.

pub mod error;
pub mod gemini;
pub mod transcript;
pub mod types;
pub mod youtube_data;

pub use error::{ClientError, ClientResult};
pub use gemini::{AiClient, GEMINI_MODEL, GeminiGenerator, TextGenerator};
pub use transcript::{TranscriptFetcher, TranscriptSource, YouTubeCaptionSource};
pub use types::{CommentSnippet, TranscriptSegment, VideoMetadata};
pub use youtube_data::YouTubeDataClient;
