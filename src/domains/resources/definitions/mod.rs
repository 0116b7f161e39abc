//! Resource template definitions.
//!
//! Each template covers one family of `youtube://` URIs keyed by a video id.
//!
//! ## Adding a New Resource Template
//!
//! 1. Create a new file implementing `ResourceTemplateDefinition`
//! 2. Export it here
//! 3. Register it in `registry.rs` and route it in `service.rs`

mod transcript;
mod video;

pub use transcript::TranscriptResource;
pub use video::VideoResource;

use super::error::ResourceError;
use crate::core::services::Services;

/// A parameterized resource addressed as `<PREFIX><video_id>`.
#[async_trait::async_trait]
pub trait ResourceTemplateDefinition {
    /// RFC 6570 template advertised to clients.
    const URI_TEMPLATE: &'static str;

    /// Literal part of the template preceding `{video_id}`.
    const PREFIX: &'static str;

    const NAME: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const MIME_TYPE: &'static str;

    /// Produce the resource text for one video.
    async fn read(video_id: &str, services: &Services) -> Result<String, ResourceError>;

    /// The video id if `uri` belongs to this template.
    ///
    /// `Some(Err(_))` means the prefix matched but the id is malformed.
    fn match_uri(uri: &str) -> Option<Result<&str, ResourceError>> {
        let video_id = uri.strip_prefix(Self::PREFIX)?;
        Some(if is_video_id(video_id) {
            Ok(video_id)
        } else {
            Err(ResourceError::invalid_uri(uri))
        })
    }
}

/// Video ids are URL-safe base64 characters.
fn is_video_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
