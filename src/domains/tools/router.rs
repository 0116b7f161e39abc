//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool is mounted through the generic route builder in `handlers`,
//! sharing one [`Services`] bundle.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    GetCommentsTool, GetLikesTool, GetTranscriptTool, QueryTool, SearchTool, SummarizeTool,
};
use super::handlers::create_route;
use crate::core::services::Services;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(services: Arc<Services>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(create_route::<GetTranscriptTool, S>(services.clone()))
        .with_route(create_route::<SummarizeTool, S>(services.clone()))
        .with_route(create_route::<QueryTool, S>(services.clone()))
        .with_route(create_route::<SearchTool, S>(services.clone()))
        .with_route(create_route::<GetCommentsTool, S>(services.clone()))
        .with_route(create_route::<GetLikesTool, S>(services))
}
