//! YouTube Data API v3 client.
//!
//! Each public method issues at most two sequential GET requests and decodes
//! the body into an explicit schema. An `error` object in the body is checked
//! before the HTTP status so the upstream message survives.

use std::collections::HashMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use super::error::{ClientError, ClientResult};
use super::types::{
    CommentSnippet, CommentThreadListResponse, SearchListResponse, StatisticsListResponse,
    VideoListResponse, VideoMetadata,
};

const SERVICE: &str = "YouTube API";

/// Upper bound accepted by `search.list` for `maxResults`.
pub const MAX_SEARCH_RESULTS: i64 = 50;

/// Upper bound accepted by `commentThreads.list` for `maxResults`.
pub const MAX_COMMENTS: i64 = 100;

const VIDEO_DETAIL_PARTS: &str = "snippet,statistics,contentDetails";

/// Clamp a requested search size to what `search.list` accepts.
pub fn clamp_search_results(requested: i64) -> i64 {
    requested.clamp(0, MAX_SEARCH_RESULTS)
}

/// Clamp a requested comment count to what `commentThreads.list` accepts.
pub fn clamp_comments(requested: i64) -> i64 {
    requested.clamp(1, MAX_COMMENTS)
}

/// Client bound to one API key and base URL.
#[derive(Clone)]
pub struct YouTubeDataClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for YouTubeDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeDataClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl YouTubeDataClient {
    /// Create a client for the given API base URL.
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Search for videos and return their details in relevance order.
    ///
    /// The id list from `search.list` drives the output order; `videos.list`
    /// may answer in any order. Ids missing from the detail response are
    /// dropped.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, max_results: i64) -> ClientResult<Vec<VideoMetadata>> {
        let max_results = clamp_search_results(max_results);

        let search: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet".to_string()),
                    ("q", query.to_string()),
                    ("maxResults", max_results.to_string()),
                    ("type", "video".to_string()),
                ],
            )
            .await?;

        let ids: Vec<String> = search.items.into_iter().map(|item| item.id.video_id).collect();
        if ids.is_empty() {
            info!("Search returned no videos");
            return Ok(Vec::new());
        }

        let details: VideoListResponse = self
            .get_json(
                "videos",
                &[("part", VIDEO_DETAIL_PARTS.to_string()), ("id", ids.join(","))],
            )
            .await?;

        let mut by_id: HashMap<String, VideoMetadata> = details
            .items
            .into_iter()
            .map(|item| (item.id.clone(), VideoMetadata::from(item)))
            .collect();

        let (videos, missing) = order_by_ids(&ids, &mut by_id);
        if !missing.is_empty() {
            debug!(?missing, "Dropping videos absent from the detail response");
        }
        info!("Search resolved {} of {} video(s)", videos.len(), ids.len());
        Ok(videos)
    }

    /// Fetch metadata for a single video.
    #[instrument(skip(self))]
    pub async fn get_video(&self, video_id: &str) -> ClientResult<VideoMetadata> {
        let details: VideoListResponse = self
            .get_json(
                "videos",
                &[("part", VIDEO_DETAIL_PARTS.to_string()), ("id", video_id.to_string())],
            )
            .await?;

        details
            .items
            .into_iter()
            .next()
            .map(VideoMetadata::from)
            .ok_or_else(|| ClientError::NotFound(format!("Video not found: {video_id}")))
    }

    /// Fetch one page of top-level comments.
    #[instrument(skip(self))]
    pub async fn get_comments(
        &self,
        video_id: &str,
        max_comments: i64,
    ) -> ClientResult<Vec<CommentSnippet>> {
        let max_comments = clamp_comments(max_comments);

        let threads: CommentThreadListResponse = self
            .get_json(
                "commentThreads",
                &[
                    ("part", "snippet".to_string()),
                    ("videoId", video_id.to_string()),
                    ("maxResults", max_comments.to_string()),
                ],
            )
            .await?;

        Ok(threads
            .items
            .into_iter()
            .map(|thread| thread.snippet.top_level_comment.snippet)
            .collect())
    }

    /// Fetch the like count of a video; an absent counter reads as zero.
    #[instrument(skip(self))]
    pub async fn get_likes(&self, video_id: &str) -> ClientResult<u64> {
        let stats: StatisticsListResponse = self
            .get_json(
                "videos",
                &[("part", "statistics".to_string()), ("id", video_id.to_string())],
            )
            .await?;

        let item = stats
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("Video not found: {video_id}")))?;

        match item.statistics.like_count {
            None => Ok(0),
            Some(raw) => raw
                .parse()
                .map_err(|_| ClientError::decode(SERVICE, format!("likeCount is not a number: {raw}"))),
        }
    }

    /// Issue a GET against `endpoint` and decode the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        decode_body(&body, status.as_u16(), status.is_success())
    }
}

/// Arrange details in search order; returns the ids that had no details.
fn order_by_ids<'a>(
    ids: &'a [String],
    by_id: &mut HashMap<String, VideoMetadata>,
) -> (Vec<VideoMetadata>, Vec<&'a str>) {
    let mut videos = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    for id in ids {
        match by_id.remove(id) {
            Some(video) => videos.push(video),
            None => missing.push(id.as_str()),
        }
    }
    (videos, missing)
}

/// Decode a Data API body, surfacing an upstream `error` object first.
fn decode_body<T: DeserializeOwned>(body: &[u8], status: u16, success: bool) -> ClientResult<T> {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !success => {
            return Err(ClientError::Status {
                service: SERVICE,
                status,
            });
        }
        Err(e) => return Err(ClientError::decode(SERVICE, e)),
    };

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ClientError::api(SERVICE, message));
    }

    if !success {
        return Err(ClientError::Status {
            service: SERVICE,
            status,
        });
    }

    serde_json::from_value(value).map_err(|e| ClientError::decode(SERVICE, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn detail(id: &str, stats: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "snippet": {
                "title": format!("title {id}"),
                "description": "",
                "thumbnails": { "high": { "url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg") } },
                "channelTitle": "Channel",
                "channelId": "UC123",
                "publishedAt": "2024-05-01T12:00:00Z"
            },
            "statistics": stats,
            "contentDetails": { "duration": "PT1M" }
        })
    }

    fn search_hits(ids: &[&str]) -> serde_json::Value {
        json!({
            "items": ids.iter().map(|id| json!({ "id": { "kind": "youtube#video", "videoId": id } })).collect::<Vec<_>>()
        })
    }

    async fn client_for(server: &MockServer) -> YouTubeDataClient {
        YouTubeDataClient::new(Client::new(), server.uri(), "test-key")
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_search_results(5), 5);
        assert_eq!(clamp_search_results(200), 50);
        assert_eq!(clamp_search_results(-3), 0);
        assert_eq!(clamp_comments(150), 100);
        assert_eq!(clamp_comments(0), 1);
    }

    #[tokio::test]
    async fn test_search_keeps_relevance_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("maxResults", "3"))
            .and(query_param("type", "video"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&["a", "b", "c"])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "a,b,c"))
            .and(query_param("part", "snippet,statistics,contentDetails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    detail("c", json!({ "viewCount": "3" })),
                    detail("a", json!({ "viewCount": "1", "likeCount": "10", "commentCount": "2" })),
                    detail("b", json!({})),
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let videos = client_for(&server).await.search("rust", 3).await.unwrap();
        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(videos[1].views, "0");
        assert_eq!(videos[1].likes, "0");
        assert_eq!(videos[1].comments, "0");
        assert_eq!(videos[0].likes, "10");
    }

    #[tokio::test]
    async fn test_search_drops_ids_without_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&["a", "gone", "c"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "a,gone,c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ detail("c", json!({})), detail("a", json!({})) ]
            })))
            .mount(&server)
            .await;

        let videos = client_for(&server).await.search("rust", 3).await.unwrap();
        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_order_by_ids_reports_missing() {
        let ids: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let item = |id: &str| -> VideoMetadata {
            serde_json::from_value::<super::super::types::VideoItem>(detail(id, json!({})))
                .unwrap()
                .into()
        };
        let mut by_id = HashMap::from([("z".to_string(), item("z")), ("x".to_string(), item("x"))]);

        let (videos, missing) = order_by_ids(&ids, &mut by_id);
        assert_eq!(videos.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), vec!["x", "z"]);
        assert_eq!(missing, vec!["y"]);
    }

    #[tokio::test]
    async fn test_search_clamps_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let videos = client_for(&server).await.search("rust", 200).await.unwrap();
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_hits_skips_detail_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let videos = client_for(&server).await.search("nothing", 5).await.unwrap();
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn test_error_field_surfaces_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "The request cannot be completed because you have exceeded your quota." }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.search("rust", 5).await.unwrap_err();
        match err {
            ClientError::Api { message, .. } => assert!(message.contains("exceeded your quota")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_field_in_detail_stage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&["a"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "message": "Backend Error" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.search("rust", 5).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { .. }));
        assert!(err.to_string().contains("Backend Error"));
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_likes("abc").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "id": { "kind": "youtube#channel" } } ]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.search("rust", 5).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_comments_caps_request_at_100() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("maxResults", "100"))
            .and(query_param("videoId", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "snippet": { "topLevelComment": { "snippet": { "authorDisplayName": "first", "textDisplay": "one" } } } },
                    { "snippet": { "topLevelComment": { "snippet": { "authorDisplayName": "second", "textDisplay": "two" } } } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let comments = client_for(&server).await.get_comments("abc", 150).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author_display_name.as_deref(), Some("first"));
        assert_eq!(comments[1].text_display.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_get_likes_variants() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "liked"))
            .and(query_param("part", "statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "statistics": { "likeCount": "1234" } } ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "hidden"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "statistics": { "viewCount": "9" } } ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "missing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.get_likes("liked").await.unwrap(), 1234);
        assert_eq!(client.get_likes("hidden").await.unwrap(), 0);
        let err = client.get_likes("missing").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref msg) if msg.contains("missing")));
    }

    #[tokio::test]
    async fn test_get_video_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_video("gone").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
