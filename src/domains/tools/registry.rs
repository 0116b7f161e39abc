//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The fixed list of tool names and their metadata
//! - Name-based dispatch, used directly by tests and by the HTTP transport

use std::sync::Arc;
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{
    GetCommentsTool, GetLikesTool, GetTranscriptTool, QueryTool, SearchTool, SummarizeTool,
};
use super::error::ToolError;
use super::handlers::{ResponseEnvelope, ToolHandler, invoke, to_tool};
use crate::core::services::Services;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    services: Arc<Services>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetTranscriptTool::NAME,
            SummarizeTool::NAME,
            QueryTool::NAME,
            SearchTool::NAME,
            GetCommentsTool::NAME,
            GetLikesTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            to_tool::<GetTranscriptTool>(),
            to_tool::<SummarizeTool>(),
            to_tool::<QueryTool>(),
            to_tool::<SearchTool>(),
            to_tool::<GetCommentsTool>(),
            to_tool::<GetLikesTool>(),
        ]
    }

    /// Dispatch a call by exact tool name.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<Vec<ResponseEnvelope>, ToolError> {
        let services = self.services.as_ref();
        match name {
            GetTranscriptTool::NAME => invoke::<GetTranscriptTool>(arguments, services).await,
            SummarizeTool::NAME => invoke::<SummarizeTool>(arguments, services).await,
            QueryTool::NAME => invoke::<QueryTool>(arguments, services).await,
            SearchTool::NAME => invoke::<SearchTool>(arguments, services).await,
            GetCommentsTool::NAME => invoke::<GetCommentsTool>(arguments, services).await,
            GetLikesTool::NAME => invoke::<GetLikesTool>(arguments, services).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::unknown_tool(name))
            }
        }
    }

    /// Dispatch a call and render it as a `tools/call` result (HTTP transport).
    ///
    /// `Err` is reserved for protocol-level problems (unknown tool, malformed
    /// arguments); tool failures come back as an `isError` result.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let outcome = match self.invoke(name, arguments).await {
            Err(err) if matches!(err.kind, super::error::ToolErrorKind::UnknownTool(_)) => {
                return Err(err.to_string());
            }
            other => other,
        };
        let result = super::handlers::into_call_result(name, outcome).map_err(|e| e.message.to_string())?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::error::{Operation, ToolErrorKind};
    use crate::testing::{MockGenerator, MockTranscriptSource, mock_services};
    use serde_json::json;

    fn registry(source: Arc<MockTranscriptSource>, generator: Option<Arc<MockGenerator>>) -> ToolRegistry {
        ToolRegistry::new(Arc::new(mock_services(source, generator, None)))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = registry(Arc::new(MockTranscriptSource::empty()), None);
        let names = registry.tool_names();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"youtube/get-transcript"));
        assert!(names.contains(&"youtube/summarize"));
        assert!(names.contains(&"youtube/query"));
        assert!(names.contains(&"youtube/search"));
        assert!(names.contains(&"youtube/get-comments"));
        assert!(names.contains(&"youtube/get-likes"));
    }

    #[tokio::test]
    async fn test_registry_dispatches_by_name() {
        let registry = registry(
            Arc::new(MockTranscriptSource::with_texts(["Hello", "world"])),
            Some(Arc::new(MockGenerator::new(["- point1\n- point2"]))),
        );
        let result = registry
            .invoke("youtube/summarize", json!({ "video_id": "abc123" }))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, "summary");
        assert_eq!(result[0].data["summary"], "- point1\n- point2");
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = registry(Arc::new(MockTranscriptSource::empty()), None);
        let err = registry.invoke("youtube/download", json!({})).await.unwrap_err();
        assert_eq!(err.operation, Operation::Dispatch);
        assert!(matches!(err.kind, ToolErrorKind::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_missing_gemini_key_leaves_other_tools_working() {
        let registry = registry(Arc::new(MockTranscriptSource::with_texts(["Hello"])), None);

        let err = registry
            .invoke("youtube/query", json!({ "video_id": "abc123", "query": "?" }))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ToolErrorKind::ConfigMissing(_)));

        let transcript = registry
            .invoke("youtube/get-transcript", json!({ "video_id": "abc123" }))
            .await
            .unwrap();
        assert_eq!(transcript[0].kind, "transcript");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_reports_failures_as_results() {
        let registry = registry(Arc::new(MockTranscriptSource::empty()), None);

        let result = registry
            .call_tool("youtube/get-likes", json!({ "video_id": "abc123" }))
            .await
            .unwrap();
        assert_eq!(result["isError"], true);

        assert!(registry.call_tool("unknown", json!({})).await.is_err());
        assert!(registry.call_tool("youtube/get-likes", json!({})).await.is_err());
    }
}
