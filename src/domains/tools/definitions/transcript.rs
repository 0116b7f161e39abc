//! `youtube/get-transcript`: timed captions of a video.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clients::TranscriptSegment;
use crate::clients::transcript::default_languages;
use crate::core::services::Services;
use crate::domains::tools::error::{Operation, ToolErrorKind};
use crate::domains::tools::handlers::ToolHandler;

/// Parameters for transcript retrieval.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTranscriptParams {
    #[schemars(description = "YouTube video ID (the `v` parameter of a watch URL)")]
    pub video_id: String,

    #[schemars(description = "Language codes to try, in order of preference (default: [\"en\"])")]
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptData {
    pub video_id: String,
    pub segments: Vec<TranscriptSegment>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GetTranscriptTool;

#[async_trait::async_trait]
impl ToolHandler for GetTranscriptTool {
    const NAME: &'static str = "youtube/get-transcript";
    const DESCRIPTION: &'static str = "Retrieve the time-coded transcript of a YouTube video. Tries the requested languages in order and returns the caption segments (text, start, duration) exactly as published.";
    const OPERATION: Operation = Operation::Transcript;
    const RESPONSE_TYPE: &'static str = "transcript";

    type Params = GetTranscriptParams;
    type Data = TranscriptData;

    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind> {
        let languages = if params.languages.is_empty() {
            default_languages()
        } else {
            params.languages
        };

        let segments = services
            .transcripts()
            .get(&params.video_id, &languages)
            .await?;

        Ok(TranscriptData {
            video_id: params.video_id,
            segments,
            languages,
        })
    }
}
