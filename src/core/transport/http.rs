//! HTTP transport implementation.
//!
//! Stateless JSON-RPC over POST. Each request is answered on its own; the
//! shared `McpServer` holds everything that outlives a request.
//!
//! Routes:
//! - `POST <rpc_path>`: `initialize`, `ping`, `tools/list`, `tools/call`
//!   and `notifications/*` (acknowledged with 202 and no body)
//! - `GET /health`: liveness plus whether an API key is configured
//! - `GET /`: server info

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// MCP protocol version reported by `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

const JSONRPC_VERSION: &str = "2.0";

/// Usage hints returned by `initialize`.
const INSTRUCTIONS: &str = "Google Maps tools: get_directions, get_distance, get_geocode, \
     find_place, place_nearby and place_details. Locations are addresses or {lat, lng} objects.";

/// JSON-RPC 2.0 error codes.
mod codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Incoming JSON-RPC message. A missing `id` marks a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC reply: exactly one of `result` or `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// `tools/call` parameters.
#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// State shared by the HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: Arc<str>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: Arc::from(self.config.rpc_path.as_str()),
        };

        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

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

    /// Serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.listen.to_string();
        let name = server.name().to_string();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "{} ready - JSON-RPC on POST http://{}{} (CORS {})",
            name,
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "endpoints": {
            "rpc": &*state.rpc_path,
            "health": "/health"
        },
        "tools": state
            .server
            .list_tools()
            .iter()
            .filter_map(|t| t["name"].as_str().map(str::to_string))
            .collect::<Vec<_>>()
    }))
}

/// Liveness check. A missing API key keeps the server up but every tool
/// call fails upstream, so it is reported as `degraded`.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let api_key_configured = state.server.config().has_api_key();
    Json(json!({
        "status": if api_key_configured { "healthy" } else { "degraded" },
        "api_key_configured": api_key_configured,
        "tools": state.server.list_tools().len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    tracing::Span::current().record("method", request.method.as_str());

    match process_request(&state, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Answer one JSON-RPC message. Notifications get no reply.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Some(JsonRpcResponse::error(
            request.id,
            codes::INVALID_REQUEST,
            format!("Unsupported jsonrpc version '{}'", request.jsonrpc),
        ));
    }

    if request.method.starts_with("notifications/") {
        debug!("Notification {} acknowledged", request.method);
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": state.server.name(),
                    "version": state.server.version()
                },
                "instructions": INSTRUCTIONS
            }),
        ),
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => {
            JsonRpcResponse::success(request.id, json!({ "tools": state.server.list_tools() }))
        }
        "tools/call" => handle_tools_call(state, request.id, request.params).await,
        other => {
            warn!("Unknown method: {}", other);
            JsonRpcResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )
        }
    };
    Some(response)
}

/// Tool failures come back as results with `isError`; only a malformed call
/// or an unknown tool is a protocol error.
async fn handle_tools_call(
    state: &AppState,
    id: Option<Value>,
    params: Option<Value>,
) -> JsonRpcResponse {
    let params: CallParams = match params.map(serde_json::from_value) {
        Some(Ok(p)) => p,
        Some(Err(e)) => {
            return JsonRpcResponse::error(id, codes::INVALID_PARAMS, format!("Invalid params: {e}"));
        }
        None => return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing params"),
    };

    info!("Calling tool {}", params.name);
    let arguments = params.arguments.unwrap_or_else(|| json!({}));
    match state.server.call_tool(&params.name, arguments).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => JsonRpcResponse::error(id, codes::INVALID_PARAMS, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::maps::testing::StubMapsApi;

    fn test_state(config: Config) -> AppState {
        AppState {
            server: McpServer::with_maps_api(config, Arc::new(StubMapsApi::new())),
            rpc_path: Arc::from("/mcp"),
        }
    }

    fn rpc(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    async fn call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
        process_request(state, request).await.unwrap()
    }

    #[tokio::test]
    async fn test_initialize_advertises_tools_only() {
        let state = test_state(Config::default());
        let response = call(&state, rpc("initialize", json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["capabilities"], json!({ "tools": {} }));
        assert_eq!(result["serverInfo"]["name"], "maps-mcp-server");
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tools_list_and_ping() {
        let state = test_state(Config::default());
        let response = call(&state, rpc("tools/list", json!({}))).await;
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().map(Vec::len), Some(6));

        let response = call(&state, rpc("ping", json!({}))).await;
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_notification_gets_no_reply() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(process_request(&test_state(Config::default()), request).await.is_none());
    }

    #[tokio::test]
    async fn test_tools_call_caller_error_is_tool_result() {
        let response = call(
            &test_state(Config::default()),
            rpc(
                "tools/call",
                json!({
                    "name": "find_place",
                    "arguments": {"query": "coffee", "radius": -5}
                }),
            ),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["error"]["kind"], "invalid_arguments");
    }

    #[tokio::test]
    async fn test_unknown_tool_and_method() {
        let state = test_state(Config::default());
        let response = call(
            &state,
            rpc("tools/call", json!({"name": "teleport", "arguments": {}})),
        )
        .await;
        assert_eq!(response.error.unwrap().code, codes::INVALID_PARAMS);

        let response = call(&state, rpc("tools/call", json!({"arguments": {}}))).await;
        assert_eq!(response.error.unwrap().code, codes::INVALID_PARAMS);

        let response = call(&state, rpc("resources/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version() {
        let mut request = rpc("tools/list", json!({}));
        request.jsonrpc = "1.0".to_string();
        let response = call(&test_state(Config::default()), request).await;
        assert_eq!(response.error.unwrap().code, codes::INVALID_REQUEST);
        assert_eq!(response.id, json!(1));
    }

    #[tokio::test]
    async fn test_health_reports_missing_key() {
        let response = health_check(State(test_state(Config::default())))
            .await
            .into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "degraded");
        assert_eq!(health["api_key_configured"], false);
        assert_eq!(health["tools"], 6);

        let mut config = Config::default();
        config.credentials.google_maps_api_key = Some("key".to_string());
        let response = health_check(State(test_state(config))).await.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "healthy");
    }
}
