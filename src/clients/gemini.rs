//! Generative text model client.
//!
//! [`TextGenerator`] is the seam to the model: one prompt in, text out.
//! [`AiClient`] owns the prompts for summarization and grounded question
//! answering and rejects empty generations.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::error::{ClientError, ClientResult};

/// Model used for every generation.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

const SERVICE: &str = "Gemini API";

/// A model that turns one prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier reported back to callers.
    fn model(&self) -> &str;

    /// Generate text for a single user prompt.
    async fn generate(&self, prompt: &str) -> ClientResult<String>;
}

// ============================================================================
// Gemini REST implementation
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// `generateContent` over the Gemini REST API.
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    /// Create a generator bound to one API key.
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: GEMINI_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> ClientResult<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("Gemini answered {} ({} bytes)", status, bytes.len());

        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            if status.is_success() {
                ClientError::decode(SERVICE, e)
            } else {
                ClientError::Status {
                    service: SERVICE,
                    status: status.as_u16(),
                }
            }
        })?;

        if let Some(message) = value
            .get("error")
            .map(|err| err.get("message").and_then(|m| m.as_str()).unwrap_or("unknown error"))
        {
            return Err(ClientError::api(SERVICE, message));
        }

        if !status.is_success() {
            return Err(ClientError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_value(value).map_err(|e| ClientError::decode(SERVICE, e))?;
        Ok(parsed.into_text())
    }
}

// ============================================================================
// AI client
// ============================================================================

/// Build the summarization prompt.
pub fn summary_prompt(transcript: &str) -> String {
    format!("Summarize this YouTube video transcript in 3-5 bullet points:\n\n{transcript}")
}

/// Build the grounded question-answering prompt.
pub fn grounded_query_prompt(transcript: &str, query: &str) -> String {
    format!(
        "The following is a transcript from a YouTube video:\n\
         Transcript:\n\
         {transcript}\n\n\
         Based only on the information in this transcript, please answer the following question:\n\
         {query}\n\n\
         If the transcript doesn't contain information to answer this question, please state that clearly."
    )
}

/// Summaries and grounded answers over a transcript.
///
/// Built once at startup and shared by every invocation. Cloning is cheap.
#[derive(Clone)]
pub struct AiClient {
    generator: Arc<dyn TextGenerator>,
}

impl AiClient {
    /// Wrap a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Model identifier reported in tool results.
    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Summarize a transcript into 3-5 bullet points.
    pub async fn summarize(&self, transcript: &str) -> ClientResult<String> {
        info!("Requesting summary ({} chars of transcript)", transcript.len());
        let text = self.generator.generate(&summary_prompt(transcript)).await?;
        non_empty(text, "summary")
    }

    /// Answer a question strictly from the transcript.
    pub async fn answer(&self, transcript: &str, query: &str) -> ClientResult<String> {
        info!("Requesting grounded answer");
        let text = self
            .generator
            .generate(&grounded_query_prompt(transcript, query))
            .await?;
        non_empty(text, "response")
    }
}

fn non_empty(text: String, what: &'static str) -> ClientResult<String> {
    if text.trim().is_empty() {
        Err(ClientError::EmptyGeneration(what))
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGenerator;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_query_prompt_is_grounded() {
        let prompt = grounded_query_prompt("Hello world", "Who won?");
        assert!(prompt.contains("Based only on the information in this transcript"));
        assert!(prompt.contains("please state that clearly"));
        assert!(prompt.contains("Hello world"));
        assert!(prompt.contains("Who won?"));
    }

    #[tokio::test]
    async fn test_summarize_sends_full_transcript() {
        let generator = Arc::new(MockGenerator::new(["- point1\n- point2"]));
        let ai = AiClient::new(generator.clone());

        let summary = ai.summarize("Hello world").await.unwrap();
        assert_eq!(summary, "- point1\n- point2");
        assert_eq!(
            generator.prompts(),
            vec!["Summarize this YouTube video transcript in 3-5 bullet points:\n\nHello world"]
        );
    }

    #[tokio::test]
    async fn test_empty_generation_is_an_error() {
        let ai = AiClient::new(Arc::new(MockGenerator::new(["", "  \n"])));
        assert!(matches!(
            ai.summarize("x").await,
            Err(ClientError::EmptyGeneration("summary"))
        ));
        assert!(matches!(
            ai.answer("x", "q").await,
            Err(ClientError::EmptyGeneration("response"))
        ));
    }

    #[tokio::test]
    async fn test_gemini_generate_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "gem-key"))
            .and(body_partial_json(json!({
                "contents": [ { "role": "user", "parts": [ { "text": "ping" } ] } ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [ { "content": { "parts": [ { "text": "po" }, { "text": "ng" } ] } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new(Client::new(), server.uri(), "gem-key");
        assert_eq!(generator.generate("ping").await.unwrap(), "pong");
        assert_eq!(generator.model(), GEMINI_MODEL);
    }

    #[tokio::test]
    async fn test_gemini_no_candidates_reads_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let ai = AiClient::new(Arc::new(GeminiGenerator::new(
            Client::new(),
            server.uri(),
            "gem-key",
        )));
        assert!(matches!(
            ai.summarize("text").await,
            Err(ClientError::EmptyGeneration(_))
        ));
    }

    #[tokio::test]
    async fn test_gemini_error_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new(Client::new(), server.uri(), "bad");
        let err = generator.generate("ping").await.unwrap_err();
        assert_eq!(err.to_string(), "Gemini API error: API key not valid.");
    }
}
