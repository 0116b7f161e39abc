//! `youtube/query`: answer a question from a video's transcript only.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clients::transcript::{default_languages, join_segments};
use crate::core::services::{Credential, Services};
use crate::domains::tools::error::{Operation, ToolErrorKind};
use crate::domains::tools::handlers::ToolHandler;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryParams {
    #[schemars(description = "YouTube video ID whose transcript grounds the answer")]
    pub video_id: String,

    #[schemars(description = "Natural-language question about the video")]
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryData {
    pub video_id: String,
    pub query: String,
    pub response: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct QueryTool;

#[async_trait::async_trait]
impl ToolHandler for QueryTool {
    const NAME: &'static str = "youtube/query";
    const DESCRIPTION: &'static str = "Answer a question about a YouTube video using only its transcript. States explicitly when the transcript does not contain the answer.";
    const OPERATION: Operation = Operation::Query;
    const RESPONSE_TYPE: &'static str = "query-response";
    const REQUIRES: &'static [Credential] = &[Credential::Gemini];

    type Params = QueryParams;
    type Data = QueryData;

    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind> {
        let ai = services.ai()?;
        let segments = services
            .transcripts()
            .get(&params.video_id, &default_languages())
            .await?;

        let response = ai.answer(&join_segments(&segments), &params.query).await?;

        Ok(QueryData {
            video_id: params.video_id,
            query: params.query,
            response,
            model: ai.model().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::handlers::invoke;
    use crate::testing::{MockGenerator, MockTranscriptSource, mock_services};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_query_is_grounded_in_transcript() {
        let source = Arc::new(MockTranscriptSource::with_texts(["We", "talk", "about", "Rust"]));
        let generator = Arc::new(MockGenerator::new([
            "The transcript does not contain information about the weather.",
        ]));
        let services = mock_services(source, Some(generator.clone()), None);

        let result = invoke::<QueryTool>(
            json!({ "video_id": "abc123", "query": "What is the weather?" }),
            &services,
        )
        .await
        .unwrap();

        assert_eq!(result[0].kind, "query-response");
        assert_eq!(result[0].data["query"], "What is the weather?");
        assert_eq!(result[0].data["model"], "gemini-2.0-flash");
        assert!(
            result[0].data["response"]
                .as_str()
                .unwrap()
                .contains("does not contain")
        );

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("We talk about Rust"));
        assert!(prompt.contains("Based only on the information in this transcript"));
        assert!(prompt.contains("please state that clearly"));
    }

    #[tokio::test]
    async fn test_query_requires_gemini_key() {
        let source = Arc::new(MockTranscriptSource::with_texts(["Hello"]));
        let services = mock_services(source.clone(), None, None);

        let err = invoke::<QueryTool>(json!({ "video_id": "abc123", "query": "Why?" }), &services)
            .await
            .unwrap_err();
        assert_eq!(err.operation, Operation::Query);
        assert!(matches!(err.kind, ToolErrorKind::ConfigMissing(_)));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_argument_is_required() {
        let source = Arc::new(MockTranscriptSource::with_texts(["Hello"]));
        let services = mock_services(source, Some(Arc::new(MockGenerator::new(["x"]))), None);

        let err = invoke::<QueryTool>(json!({ "video_id": "abc123" }), &services)
            .await
            .unwrap_err();
        assert!(err.is_invalid_arguments());
    }
}
