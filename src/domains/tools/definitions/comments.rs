//! `youtube/get-comments`: one page of top-level comments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clients::CommentSnippet;
use crate::core::services::{Credential, Services};
use crate::domains::tools::error::{Operation, ToolErrorKind};
use crate::domains::tools::handlers::ToolHandler;

fn default_max_comments() -> i64 {
    100
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    #[schemars(description = "YouTube video ID")]
    pub video_id: String,

    #[schemars(description = "Maximum number of comments (default: 100, max: 100)")]
    #[serde(default = "default_max_comments")]
    pub max_comments: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsData {
    pub video_id: String,
    pub comments: Vec<CommentSnippet>,
    pub total_count: usize,
}

#[derive(Debug, Clone)]
pub struct GetCommentsTool;

#[async_trait::async_trait]
impl ToolHandler for GetCommentsTool {
    const NAME: &'static str = "youtube/get-comments";
    const DESCRIPTION: &'static str = "Retrieve top-level comments of a YouTube video with author, text, like count and timestamps, as returned by the YouTube Data API.";
    const OPERATION: Operation = Operation::Comments;
    const RESPONSE_TYPE: &'static str = "comments";
    const REQUIRES: &'static [Credential] = &[Credential::YouTube];

    type Params = GetCommentsParams;
    type Data = CommentsData;

    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind> {
        let comments = services
            .youtube()?
            .get_comments(&params.video_id, params.max_comments)
            .await?;

        Ok(CommentsData {
            video_id: params.video_id,
            total_count: comments.len(),
            comments,
        })
    }
}
