//! `youtube/search`: keyword search with full video details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clients::VideoMetadata;
use crate::core::services::{Credential, Services};
use crate::domains::tools::error::{Operation, ToolErrorKind};
use crate::domains::tools::handlers::ToolHandler;

fn default_max_results() -> i64 {
    5
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Search terms")]
    pub query: String,

    #[schemars(description = "Maximum number of videos to return (default: 5, max: 50)")]
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchData {
    pub query: String,
    pub videos: Vec<VideoMetadata>,
    pub total_results: usize,
}

#[derive(Debug, Clone)]
pub struct SearchTool;

#[async_trait::async_trait]
impl ToolHandler for SearchTool {
    const NAME: &'static str = "youtube/search";
    const DESCRIPTION: &'static str = "Search YouTube for videos matching a query. Returns videos in relevance order with title, channel, publish date, thumbnail, duration and view/like/comment counts.";
    const OPERATION: Operation = Operation::Search;
    const RESPONSE_TYPE: &'static str = "search-results";
    const REQUIRES: &'static [Credential] = &[Credential::YouTube];

    type Params = SearchParams;
    type Data = SearchData;

    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind> {
        let videos = services
            .youtube()?
            .search(&params.query, params.max_results)
            .await?;

        Ok(SearchData {
            query: params.query,
            total_results: videos.len(),
            videos,
        })
    }
}
