//! Test doubles for the model and caption seams.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;

use crate::clients::error::{ClientError, ClientResult};
use crate::clients::gemini::{GEMINI_MODEL, TextGenerator};
use crate::clients::transcript::TranscriptSource;
use crate::clients::types::TranscriptSegment;
use crate::clients::{AiClient, TranscriptFetcher, YouTubeDataClient};
use crate::core::Services;

/// Generator answering with canned responses, in order, then repeating the last.
pub struct MockGenerator {
    responses: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new<'a>(responses: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            responses: responses.into_iter().map(str::to_string).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn model(&self) -> &str {
        GEMINI_MODEL
    }

    async fn generate(&self, prompt: &str) -> ClientResult<String> {
        let mut prompts = self.prompts.lock().unwrap();
        let index = prompts.len().min(self.responses.len().saturating_sub(1));
        prompts.push(prompt.to_string());
        Ok(self.responses.get(index).cloned().unwrap_or_default())
    }
}

/// Caption source returning a fixed transcript or a fixed failure.
pub struct MockTranscriptSource {
    result: Result<Vec<TranscriptSegment>, String>,
    calls: AtomicUsize,
    languages: Mutex<Vec<Vec<String>>>,
}

impl MockTranscriptSource {
    /// Source answering with one segment per text, one second each.
    pub fn with_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let segments = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| TranscriptSegment {
                text: text.to_string(),
                start: i as f64,
                duration: 1.0,
            })
            .collect();
        Self::new(Ok(segments))
    }

    /// Source for tests that never read captions.
    pub fn empty() -> Self {
        Self::new(Ok(Vec::new()))
    }

    /// Source failing every fetch with an upstream error.
    pub fn failing(message: &str) -> Self {
        Self::new(Err(message.to_string()))
    }

    fn new(result: Result<Vec<TranscriptSegment>, String>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Language lists passed to each fetch.
    pub fn requested_languages(&self) -> Vec<Vec<String>> {
        self.languages.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptSource for MockTranscriptSource {
    async fn fetch(&self, _video_id: &str, languages: &[String]) -> ClientResult<Vec<TranscriptSegment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(languages.to_vec());
        self.result
            .clone()
            .map_err(|message| ClientError::api("Caption source", message))
    }
}

/// Services over mock captions, an optional mock model and an optional
/// Data API client pointed at `youtube_base_url`.
pub fn mock_services(
    transcripts: Arc<MockTranscriptSource>,
    generator: Option<Arc<MockGenerator>>,
    youtube_base_url: Option<&str>,
) -> Services {
    Services::new(
        TranscriptFetcher::new(transcripts),
        generator.map(|g| AiClient::new(g)),
        youtube_base_url.map(|url| YouTubeDataClient::new(Client::new(), url, "test-youtube-key")),
    )
}
