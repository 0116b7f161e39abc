//! HTTP transport implementation.
//!
//! JSON-RPC 2.0 over `POST {rpc_path}`, plus `GET /health` and a `GET /`
//! discovery document. Stateless: every request is answered on its own.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

const JSONRPC_VERSION: &str = "2.0";
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcError {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn invalid_params(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, JsonRpcError::INVALID_PARAMS, message)
    }
}

/// Shared handler state.
type AppState = Arc<McpServer>;

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(Arc::new(server))
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Bind and serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            cors = self.config.enable_cors,
            "Ready - listening on {} (JSON-RPC at POST {})", addr, self.config.rpc_path
        );

        axum::serve(listener, app).await.map_err(|e| {
            error!("HTTP server stopped: {}", e);
            TransportError::http(e.to_string())
        })
    }
}

/// Discovery document.
async fn root_handler(State(server): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "instructions": server.instructions(),
        "tools": server
            .list_tools()
            .iter()
            .filter_map(|t| t.get("name").cloned())
            .collect::<Vec<_>>(),
        "endpoints": {
            "health": "/health"
        }
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    debug!("Received JSON-RPC request");
    (StatusCode::OK, Json(dispatch(&server, request).await))
}

/// Required string parameter, or an `invalid params` response.
fn required_str(params: &Value, key: &str) -> std::result::Result<String, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("Missing {}", key))
}

fn from_result(id: Option<Value>, result: std::result::Result<Value, String>) -> JsonRpcResponse {
    match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(message) => JsonRpcResponse::invalid_params(id, message),
    }
}

/// Route one JSON-RPC request to the server.
async fn dispatch(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let JsonRpcRequest {
        jsonrpc,
        id,
        method,
        params,
    } = request;

    if jsonrpc != JSONRPC_VERSION {
        return JsonRpcResponse::error(id, JsonRpcError::INVALID_REQUEST, "Invalid Request");
    }

    let params = params.unwrap_or_else(|| json!({}));

    match method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {}, "resources": {}, "prompts": {} },
                "serverInfo": { "name": server.name(), "version": server.version() },
                "instructions": server.instructions()
            }),
        ),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": server.list_tools() })),
        "tools/call" => {
            let name = match required_str(&params, "name") {
                Ok(name) => name,
                Err(message) => return JsonRpcResponse::invalid_params(id, message),
            };
            let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
            from_result(id, server.call_tool(&name, arguments).await)
        }
        "resources/list" => JsonRpcResponse::success(
            id,
            json!({ "resources": server.list_resources().await }),
        ),
        "resources/templates/list" => JsonRpcResponse::success(
            id,
            json!({ "resourceTemplates": server.list_resource_templates().await }),
        ),
        "resources/read" => match required_str(&params, "uri") {
            Ok(uri) => from_result(id, server.read_resource(&uri).await),
            Err(message) => JsonRpcResponse::invalid_params(id, message),
        },
        "prompts/list" => {
            JsonRpcResponse::success(id, json!({ "prompts": server.list_prompts().await }))
        }
        "prompts/get" => match required_str(&params, "name") {
            Ok(name) => {
                let arguments = params.get("arguments").cloned();
                from_result(id, server.get_prompt(&name, arguments).await)
            }
            Err(message) => JsonRpcResponse::invalid_params(id, message),
        },
        m if m.starts_with("notifications/") => {
            debug!("Notification acknowledged");
            JsonRpcResponse::success(id, Value::Null)
        }
        _ => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::error(id, JsonRpcError::METHOD_NOT_FOUND, "Method not found")
        }
    }
}
