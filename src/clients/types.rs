//! Data model shared by the clients and the MCP surfaces.
//!
//! Upstream payloads are decoded into the `*Response` schemas first and then
//! converted into the public types. Counters are the only fields that get a
//! default when upstream omits them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Value used for an absent statistics counter.
pub const ZERO_COUNTER: &str = "0";

/// One timed caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Caption text exactly as published.
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration, in seconds.
    pub duration: f64,
}

impl TranscriptSegment {
    /// Offset at which the segment stops being displayed.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Normalized metadata for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: String,
    pub views: String,
    pub likes: String,
    pub comments: String,
    /// ISO-8601 duration, left as upstream sent it.
    pub duration: String,
}

impl VideoMetadata {
    /// Render the metadata as a plain-text block.
    pub fn describe(&self) -> String {
        [
            ("Title", &self.title),
            ("Channel", &self.channel_title),
            ("Published", &self.published_at),
            ("Description", &self.description),
            ("Duration", &self.duration),
            ("Views", &self.views),
            ("Likes", &self.likes),
            ("Comments", &self.comments),
        ]
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// A top-level comment snippet, field names as upstream sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_channel_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Any other snippet fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ============================================================================
// YouTube Data API v3 response schemas
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItemId {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    pub content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnails {
    pub high: Thumbnail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentDetails {
    pub duration: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatisticsListResponse {
    #[serde(default)]
    pub items: Vec<StatisticsItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatisticsItem {
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopLevelComment {
    pub snippet: CommentSnippet,
}

/// Optional-to-default coercion for statistics counters.
pub(crate) fn counter_or_zero(counter: Option<String>) -> String {
    counter.unwrap_or_else(|| ZERO_COUNTER.to_string())
}

impl From<VideoItem> for VideoMetadata {
    fn from(item: VideoItem) -> Self {
        let VideoItem {
            id,
            snippet,
            statistics,
            content_details,
        } = item;

        Self {
            id,
            title: snippet.title,
            description: snippet.description,
            thumbnail: snippet.thumbnails.high.url,
            channel_title: snippet.channel_title,
            channel_id: snippet.channel_id,
            published_at: snippet.published_at,
            views: counter_or_zero(statistics.view_count),
            likes: counter_or_zero(statistics.like_count),
            comments: counter_or_zero(statistics.comment_count),
            duration: content_details.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_item(statistics: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "vid1",
            "snippet": {
                "title": "Title",
                "description": "Desc",
                "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/vid1/hq.jpg" } },
                "channelTitle": "Channel",
                "channelId": "UC1",
                "publishedAt": "2024-01-01T00:00:00Z"
            },
            "statistics": statistics,
            "contentDetails": { "duration": "PT4M13S" }
        })
    }

    #[test]
    fn test_missing_counters_default_to_zero_string() {
        let item: VideoItem = serde_json::from_value(video_item(json!({ "viewCount": "42" }))).unwrap();
        let video = VideoMetadata::from(item);
        assert_eq!(video.views, "42");
        assert_eq!(video.likes, "0");
        assert_eq!(video.comments, "0");
        assert_eq!(video.duration, "PT4M13S");
    }

    #[test]
    fn test_missing_required_snippet_field_is_rejected() {
        let mut raw = video_item(json!({}));
        raw["snippet"].as_object_mut().unwrap().remove("title");
        assert!(serde_json::from_value::<VideoItem>(raw).is_err());
    }

    #[test]
    fn test_comment_snippet_keeps_upstream_field_names() {
        let raw = json!({
            "authorDisplayName": "alice",
            "textDisplay": "Great <b>video</b>",
            "likeCount": 3,
            "publishedAt": "2024-02-02T10:00:00Z",
            "viewerRating": "none"
        });
        let snippet: CommentSnippet = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(snippet.author_display_name.as_deref(), Some("alice"));
        assert_eq!(serde_json::to_value(&snippet).unwrap(), raw);
    }

    #[test]
    fn test_describe_lists_counters() {
        let item: VideoItem = serde_json::from_value(video_item(json!({}))).unwrap();
        let text = VideoMetadata::from(item).describe();
        assert_eq!(
            text,
            "Title: Title\nChannel: Channel\nPublished: 2024-01-01T00:00:00Z\nDescription: Desc\n\
             Duration: PT4M13S\nViews: 0\nLikes: 0\nComments: 0"
        );
    }
}
