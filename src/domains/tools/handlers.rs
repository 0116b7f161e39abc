//! Tool handler trait and the machinery shared by every tool.
//!
//! A tool declares its name, parameter schema, response tag and required
//! credentials, and implements [`ToolHandler::run`]. Everything else (key
//! checks, argument decoding, envelope wrapping, error tagging, conversion to
//! an MCP result) lives here so the six tools cannot drift apart.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::{Operation, ToolError, ToolErrorKind};
use crate::core::services::{Credential, Services};

/// Uniform `{type, data}` wrapper around every tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

impl ResponseEnvelope {
    pub fn new(kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }
}

/// One MCP tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Operation reported in error messages.
    const OPERATION: Operation;

    /// `type` tag of the success envelope.
    const RESPONSE_TYPE: &'static str;

    /// Keys that must be configured before the tool touches the network.
    const REQUIRES: &'static [Credential] = &[];

    type Params: DeserializeOwned + JsonSchema + Send + 'static;
    type Data: Serialize + Send;

    /// Execute the tool logic.
    async fn run(params: Self::Params, services: &Services) -> Result<Self::Data, ToolErrorKind>;
}

/// Check credentials, run the tool and wrap its output.
pub async fn execute<T: ToolHandler>(
    params: T::Params,
    services: &Services,
) -> Result<Vec<ResponseEnvelope>, ToolError> {
    info!(tool = T::NAME, "Executing tool");
    services
        .ensure(T::REQUIRES)
        .map_err(|missing| ToolError::new(T::OPERATION, missing))?;

    let data = T::run(params, services)
        .await
        .map_err(|kind| ToolError::new(T::OPERATION, kind))?;
    let data = serde_json::to_value(data)
        .map_err(|e| ToolError::new(T::OPERATION, ToolErrorKind::Unknown(e.to_string())))?;

    Ok(vec![ResponseEnvelope::new(T::RESPONSE_TYPE, data)])
}

/// Decode raw arguments and execute.
pub async fn invoke<T: ToolHandler>(
    arguments: serde_json::Value,
    services: &Services,
) -> Result<Vec<ResponseEnvelope>, ToolError> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    let params: T::Params = serde_json::from_value(arguments).map_err(|e| {
        ToolError::new(T::OPERATION, ToolErrorKind::invalid_arguments(e.to_string()))
    })?;
    execute::<T>(params, services).await
}

/// Turn an invocation outcome into an MCP result.
///
/// Tool failures become an error result the client can read; only malformed
/// arguments are reported as a protocol error.
pub fn into_call_result(
    tool: &str,
    outcome: Result<Vec<ResponseEnvelope>, ToolError>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(envelopes) => {
            let text = serde_json::to_string(&envelopes)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(err) if err.is_invalid_arguments() => {
            Err(McpError::invalid_params(err.to_string(), None))
        }
        Err(err) => {
            warn!(tool, category = err.kind.category(), "{}", err);
            Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
        }
    }
}

/// Create a Tool model for a tool (metadata).
pub fn to_tool<T: ToolHandler>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: cached_schema_for_type::<T::Params>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create a ToolRoute for the rmcp router.
pub fn create_route<T, S>(services: Arc<Services>) -> ToolRoute<S>
where
    T: ToolHandler,
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_tool::<T>(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let services = services.clone();
        async move {
            let outcome = invoke::<T>(serde_json::Value::Object(args), &services).await;
            into_call_result(T::NAME, outcome)
        }
        .boxed()
    })
}
