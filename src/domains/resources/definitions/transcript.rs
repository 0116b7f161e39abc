//! Timed transcript resource.

use super::ResourceTemplateDefinition;
use crate::clients::transcript::{default_languages, format_timed};
use crate::core::services::Services;
use crate::domains::resources::error::ResourceError;

/// `youtube://transcripts/{video_id}`: one `[start-end] text` line per segment.
pub struct TranscriptResource;

#[async_trait::async_trait]
impl ResourceTemplateDefinition for TranscriptResource {
    const URI_TEMPLATE: &'static str = "youtube://transcripts/{video_id}";
    const PREFIX: &'static str = "youtube://transcripts/";
    const NAME: &'static str = "Video Transcript";
    const TITLE: &'static str = "YouTube Transcript";
    const DESCRIPTION: &'static str = "English transcript of a YouTube video with start and end offsets in seconds";
    const MIME_TYPE: &'static str = "text/plain";

    async fn read(video_id: &str, services: &Services) -> Result<String, ResourceError> {
        let segments = services
            .transcripts()
            .get(video_id, &default_languages())
            .await?;
        Ok(format_timed(&segments))
    }
}
