//! Upstream services shared by every tool, resource and prompt.
//!
//! The bundle is built exactly once at startup from [`Config`] and handed to
//! the domains behind an `Arc`. A client whose API key is absent is simply
//! not built; asking for it yields the missing [`Credential`].

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use super::config::Config;
use super::error::Result;
use crate::clients::{
    AiClient, GeminiGenerator, TranscriptFetcher, YouTubeCaptionSource, YouTubeDataClient,
};

/// An API key a handler may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Gemini,
    YouTube,
}

impl Credential {
    /// Environment variable the key is read from.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::YouTube => "YOUTUBE_API_KEY",
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// Shared upstream clients.
#[derive(Clone)]
pub struct Services {
    transcripts: TranscriptFetcher,
    ai: Option<AiClient>,
    youtube: Option<YouTubeDataClient>,
}

impl Services {
    /// Assemble a bundle from already-built clients.
    pub fn new(
        transcripts: TranscriptFetcher,
        ai: Option<AiClient>,
        youtube: Option<YouTubeDataClient>,
    ) -> Self {
        Self {
            transcripts,
            ai,
            youtube,
        }
    }

    /// Build every client the configuration allows, sharing one HTTP pool.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("youtube-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let transcripts = TranscriptFetcher::new(Arc::new(YouTubeCaptionSource::new(
            client.clone(),
            config.upstream.youtube_web_url.clone(),
        )));

        let ai = config.credentials.gemini_api_key.as_ref().map(|key| {
            AiClient::new(Arc::new(GeminiGenerator::new(
                client.clone(),
                config.upstream.gemini_api_url.clone(),
                key.clone(),
            )))
        });

        let youtube = config.credentials.youtube_api_key.as_ref().map(|key| {
            YouTubeDataClient::new(
                client.clone(),
                config.upstream.youtube_api_url.clone(),
                key.clone(),
            )
        });

        if ai.is_none() {
            warn!("GEMINI_API_KEY not set - summarization and query tools will report an error");
        }
        if youtube.is_none() {
            warn!("YOUTUBE_API_KEY not set - search, comments and likes tools will report an error");
        }

        info!(
            "Services ready (ai: {}, youtube data: {})",
            ai.is_some(),
            youtube.is_some()
        );

        Ok(Self::new(transcripts, ai, youtube))
    }

    /// Caption retrieval. Needs no key.
    pub fn transcripts(&self) -> &TranscriptFetcher {
        &self.transcripts
    }

    /// The model client, if `GEMINI_API_KEY` was set.
    pub fn ai(&self) -> std::result::Result<&AiClient, Credential> {
        self.ai.as_ref().ok_or(Credential::Gemini)
    }

    /// The Data API client, if `YOUTUBE_API_KEY` was set.
    pub fn youtube(&self) -> std::result::Result<&YouTubeDataClient, Credential> {
        self.youtube.as_ref().ok_or(Credential::YouTube)
    }

    /// First credential in `required` that is not configured.
    pub fn ensure(&self, required: &[Credential]) -> std::result::Result<(), Credential> {
        match required.iter().find(|c| !self.has(**c)) {
            Some(missing) => Err(*missing),
            None => Ok(()),
        }
    }

    fn has(&self, credential: Credential) -> bool {
        match credential {
            Credential::Gemini => self.ai.is_some(),
            Credential::YouTube => self.youtube.is_some(),
        }
    }
}
