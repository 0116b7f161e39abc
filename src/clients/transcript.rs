//! Caption retrieval.
//!
//! [`TranscriptSource`] is the seam to whatever produces captions.
//! [`YouTubeCaptionSource`] reads the caption track list embedded in the
//! watch page and downloads the chosen track as `json3`. [`TranscriptFetcher`]
//! is what the tools use: it defaults the language list and tags every
//! failure with the video id.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::error::{ClientError, ClientResult};
use super::types::TranscriptSegment;

/// Language requested when the caller gives none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default language list.
pub fn default_languages() -> Vec<String> {
    vec![DEFAULT_LANGUAGE.to_string()]
}

/// Anything that can produce the ordered captions of a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch captions in the first available language of `languages`.
    async fn fetch(&self, video_id: &str, languages: &[String]) -> ClientResult<Vec<TranscriptSegment>>;
}

/// Join segment texts with single spaces, in order, untrimmed.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per segment: `[start-end] text`.
pub fn format_timed(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| format!("[{:.2}-{:.2}] {}", s.start, s.end(), s.text))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Fetcher
// ============================================================================

/// Transcript access used by the tools, resources and prompts.
#[derive(Clone)]
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptFetcher {
    /// Wrap a caption source.
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }

    /// Fetch a transcript, preferring `languages` in order.
    ///
    /// Any failure becomes [`ClientError::TranscriptUnavailable`] carrying the
    /// video id and the underlying cause.
    #[instrument(skip(self))]
    pub async fn get(&self, video_id: &str, languages: &[String]) -> ClientResult<Vec<TranscriptSegment>> {
        let defaults;
        let languages = if languages.is_empty() {
            defaults = default_languages();
            defaults.as_slice()
        } else {
            languages
        };

        match self.source.fetch(video_id, languages).await {
            Ok(segments) => {
                info!("Fetched {} transcript segment(s)", segments.len());
                Ok(segments)
            }
            Err(err @ ClientError::TranscriptUnavailable { .. }) => Err(err),
            Err(err) => {
                warn!("Transcript fetch failed: {}", err);
                Err(ClientError::transcript_unavailable(video_id, err.to_string()))
            }
        }
    }
}

// ============================================================================
// Watch-page caption source
// ============================================================================

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static PLAYER_RESPONSE_RE: OnceLock<Regex> = OnceLock::new();

fn player_response_regex() -> &'static Regex {
    PLAYER_RESPONSE_RE.get_or_init(|| {
        Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").expect("Failed to compile player response regex")
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    /// Set on line-break events appended to the previous caption.
    #[serde(default)]
    a_append: u8,
    #[serde(default)]
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Pull the player response object out of a watch page.
fn extract_player_response(html: &str) -> Result<PlayerResponse, String> {
    let found = player_response_regex()
        .find(html)
        .ok_or_else(|| "the watch page does not embed a player response".to_string())?;

    // The object starts at the final `{` of the match; the streaming
    // deserializer stops at its closing brace.
    let json = &html[found.end() - 1..];
    serde_json::Deserializer::from_str(json)
        .into_iter::<PlayerResponse>()
        .next()
        .ok_or_else(|| "empty player response".to_string())?
        .map_err(|e| format!("malformed player response: {e}"))
}

/// Pick a track per requested language, manual tracks first.
fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        tracks
            .iter()
            .filter(|t| &t.language_code == lang)
            .min_by_key(|t| t.is_generated())
    })
}

fn into_segments(response: TimedTextResponse) -> Vec<TranscriptSegment> {
    response
        .events
        .into_iter()
        .filter(|event| event.a_append == 0)
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            if text.trim_matches('\n').is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect()
}

/// Caption source backed by the public watch page.
pub struct YouTubeCaptionSource {
    client: Client,
    web_url: String,
}

impl YouTubeCaptionSource {
    /// Create a source reading watch pages under `web_url`.
    pub fn new(client: Client, web_url: impl Into<String>) -> Self {
        Self {
            client,
            web_url: web_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn watch_page(&self, video_id: &str) -> ClientResult<String> {
        let response = self
            .client
            .get(format!("{}/watch", self.web_url))
            .query(&[("v", video_id)])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::transcript_unavailable(
                video_id,
                format!("the watch page returned HTTP {}", response.status()),
            ));
        }
        Ok(response.text().await?)
    }

    async fn download_track(&self, video_id: &str, track: &CaptionTrack) -> ClientResult<Vec<TranscriptSegment>> {
        debug!("Downloading {} caption track", track.language_code);
        let response = self
            .client
            .get(&track.base_url)
            .query(&[("fmt", "json3")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::transcript_unavailable(
                video_id,
                format!("the caption track returned HTTP {}", response.status()),
            ));
        }

        let timed: TimedTextResponse = response.json().await.map_err(|e| {
            ClientError::transcript_unavailable(video_id, format!("malformed caption track: {e}"))
        })?;
        Ok(into_segments(timed))
    }
}

#[async_trait]
impl TranscriptSource for YouTubeCaptionSource {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> ClientResult<Vec<TranscriptSegment>> {
        let html = self.watch_page(video_id).await?;
        let player = extract_player_response(&html)
            .map_err(|reason| ClientError::transcript_unavailable(video_id, reason))?;

        if let Some(status) = &player.playability_status {
            if status.status.as_deref().is_some_and(|s| s != "OK") {
                let reason = status.reason.as_deref().unwrap_or("no reason given");
                return Err(ClientError::transcript_unavailable(
                    video_id,
                    format!("The video is unavailable ({reason})"),
                ));
            }
        }

        let tracks = player
            .captions
            .map(|c| c.player_captions_tracklist_renderer.caption_tracks)
            .unwrap_or_default();
        if tracks.is_empty() {
            return Err(ClientError::transcript_unavailable(
                video_id,
                "Subtitles are disabled for this video",
            ));
        }

        let track = select_track(&tracks, languages).ok_or_else(|| {
            let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
            ClientError::transcript_unavailable(
                video_id,
                format!(
                    "No transcripts were found for any of the requested language codes: {:?} (available: {:?})",
                    languages, available
                ),
            )
        })?;

        self.download_track(video_id, track).await
    }
}
