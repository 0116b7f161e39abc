//! `youtube/summarize`: bullet-point summary of a video's transcript.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clients::transcript::{default_languages, join_segments};
use crate::core::services::{Credential, Services};
use crate::domains::tools::error::{Operation, ToolErrorKind};
use crate::domains::tools::handlers::ToolHandler;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    #[schemars(description = "YouTube video ID to summarize")]
    pub video_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub video_id: String,
    pub summary: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SummarizeTool;

#[async_trait::async_trait]
impl ToolHandler for SummarizeTool {
    const NAME: &'static str = "youtube/summarize";
    const DESCRIPTION: &'static str = "Summarize a YouTube video in 3-5 bullet points, generated from its full English transcript.";
    const OPERATION: Operation = Operation::Summarization;
    const RESPONSE_TYPE: &'static str = "summary";
    const REQUIRES: &'static [Credential] = &[Credential::Gemini];

    type Params = SummarizeParams;
    type Data = SummaryData;

    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind> {
        let ai = services.ai()?;
        let segments = services
            .transcripts()
            .get(&params.video_id, &default_languages())
            .await?;

        let summary = ai.summarize(&join_segments(&segments)).await?;

        Ok(SummaryData {
            video_id: params.video_id,
            summary,
            model: ai.model().to_string(),
        })
    }
}
