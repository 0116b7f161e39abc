//! Prompt service implementation.
//!
//! Renders the registered prompts with the video context they need: the timed
//! transcript always, and the metadata block when the Data API is configured.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;
use crate::clients::transcript::{default_languages, format_timed};
use crate::core::services::Services;

/// Service for listing and rendering prompts.
pub struct PromptService {
    services: Arc<Services>,

    /// Registry of available prompts.
    /// Key: prompt name, Value: prompt template
    prompts: HashMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a new PromptService over the shared upstream services.
    pub fn new(services: Arc<Services>) -> Self {
        info!("Initializing PromptService");
        let prompts = get_all_prompts()
            .into_iter()
            .map(|template| (template.name.clone(), template))
            .collect();
        Self { services, prompts }
    }

    /// List all available prompts, sorted by name.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        let mut prompts: Vec<Prompt> = self
            .prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect();
        prompts.sort_by(|a, b| a.name.cmp(&b.name));
        prompts
    }

    /// Render a prompt for the video named by its `video_id` argument.
    #[instrument(skip(self, arguments))]
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let mut values = arguments.unwrap_or_default();

        for arg in &template.arguments {
            let present = values.get(&arg.name).is_some_and(|v| !v.trim().is_empty());
            if arg.required.unwrap_or(false) && !present {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        let video_id = values
            .get("video_id")
            .cloned()
            .ok_or_else(|| PromptError::missing_argument("video_id"))?;

        let segments = self
            .services
            .transcripts()
            .get(&video_id, &default_languages())
            .await?;
        values.insert("transcript".to_string(), format_timed(&segments));

        if let Some(metadata) = self.metadata(&video_id).await {
            values.insert("metadata".to_string(), metadata);
        }

        let content = template.render(&values)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }

    /// Metadata block, or `None` when the Data API is unavailable.
    async fn metadata(&self, video_id: &str) -> Option<String> {
        let youtube = self.services.youtube().ok()?;
        match youtube.get_video(video_id).await {
            Ok(video) => Some(video.describe()),
            Err(e) => {
                warn!("Rendering prompt without metadata: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTranscriptSource, mock_services};
    use rmcp::model::PromptMessageContent;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(source: MockTranscriptSource, youtube: Option<&str>) -> PromptService {
        PromptService::new(Arc::new(mock_services(Arc::new(source), None, youtube)))
    }

    fn args(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn text_of(result: &GetPromptResult) -> &str {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text,
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_prompts() {
        let service = service(MockTranscriptSource::empty(), None);
        let prompts = service.list_prompts().await;
        let names: Vec<_> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["youtube/query", "youtube/summarize"]);
    }

    #[tokio::test]
    async fn test_summarize_prompt_without_metadata() {
        let service = service(MockTranscriptSource::with_texts(["Hello", "world"]), None);
        let result = service
            .get_prompt("youtube/summarize", args(&[("video_id", "abc123")]))
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.starts_with("Summarize this YouTube video based on its transcript:\n"));
        assert!(text.contains("Transcript:\n[0.00-1.00] Hello\n[1.00-2.00] world"));
        assert!(!text.contains("Title:"));
        assert!(!text.contains("{{"));
    }

    #[tokio::test]
    async fn test_query_prompt_with_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ {
                    "id": "abc123",
                    "snippet": {
                        "title": "Intro",
                        "description": "",
                        "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg" } },
                        "channelTitle": "Chan",
                        "channelId": "UC1",
                        "publishedAt": "2024-01-01T00:00:00Z"
                    },
                    "contentDetails": { "duration": "PT2M" }
                } ]
            })))
            .mount(&server)
            .await;

        let service = service(MockTranscriptSource::with_texts(["Hi"]), Some(&server.uri()));
        let result = service
            .get_prompt(
                "youtube/query",
                args(&[("video_id", "abc123"), ("query", "Who is speaking?")]),
            )
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.contains("Title: Intro"));
        assert!(text.contains("Question: Who is speaking?"));
        assert!(text.contains("please state that clearly"));
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let service = service(MockTranscriptSource::with_texts(["Hi"]), None);
        let err = service
            .get_prompt("youtube/query", args(&[("video_id", "abc123")]))
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::MissingArgument(ref a) if a == "query"));

        let err = service.get_prompt("youtube/summarize", None).await.unwrap_err();
        assert!(matches!(err, PromptError::MissingArgument(_)));
    }

    #[tokio::test]
    async fn test_unknown_prompt_and_transcript_failure() {
        let service = service(MockTranscriptSource::failing("Subtitles are disabled"), None);
        assert!(matches!(
            service.get_prompt("greeting", None).await,
            Err(PromptError::NotFound(_))
        ));
        assert!(matches!(
            service
                .get_prompt("youtube/summarize", args(&[("video_id", "abc123")]))
                .await,
            Err(PromptError::Upstream(_))
        ));
    }
}
