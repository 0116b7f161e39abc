//! `youtube/get-likes`: current like count of a video.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::services::{Credential, Services};
use crate::domains::tools::error::{Operation, ToolErrorKind};
use crate::domains::tools::handlers::ToolHandler;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetLikesParams {
    #[schemars(description = "YouTube video ID")]
    pub video_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LikesData {
    pub video_id: String,
    pub likes: u64,
}

#[derive(Debug, Clone)]
pub struct GetLikesTool;

#[async_trait::async_trait]
impl ToolHandler for GetLikesTool {
    const NAME: &'static str = "youtube/get-likes";
    const DESCRIPTION: &'static str = "Get the current like count of a YouTube video.";
    const OPERATION: Operation = Operation::Likes;
    const RESPONSE_TYPE: &'static str = "stats";
    const REQUIRES: &'static [Credential] = &[Credential::YouTube];

    type Params = GetLikesParams;
    type Data = LikesData;

    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind> {
        let likes = services.youtube()?.get_likes(&params.video_id).await?;
        Ok(LikesData {
            video_id: params.video_id,
            likes,
        })
    }
}
