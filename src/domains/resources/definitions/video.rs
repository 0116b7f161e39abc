//! Video metadata resource.

use super::ResourceTemplateDefinition;
use crate::core::services::Services;
use crate::domains::resources::error::ResourceError;

/// `youtube://video/{video_id}`: plain-text metadata block.
pub struct VideoResource;

#[async_trait::async_trait]
impl ResourceTemplateDefinition for VideoResource {
    const URI_TEMPLATE: &'static str = "youtube://video/{video_id}";
    const PREFIX: &'static str = "youtube://video/";
    const NAME: &'static str = "Video Information";
    const TITLE: &'static str = "YouTube Video Metadata";
    const DESCRIPTION: &'static str = "Title, channel, publish date, description, duration and engagement counters of a YouTube video";
    const MIME_TYPE: &'static str = "text/plain";

    async fn read(video_id: &str, services: &Services) -> Result<String, ResourceError> {
        let video = services.youtube()?.get_video(video_id).await?;
        Ok(video.describe())
    }
}
