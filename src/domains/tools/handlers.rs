//! Tool handler trait.
//!
//! Every maps tool is a unit struct implementing [`MapsTool`]: it declares
//! its name, description, parameter type and result type, and provides
//! `run()` (validation, one upstream call, response shaping) and
//! `summarize()`. Metadata, rmcp routes and the HTTP handler are derived
//! from those.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::ToolError;
use super::definitions::common::{into_call_result, parse_arguments};
use crate::domains::maps::MapsApi;

/// A tool backed by the mapping provider.
pub trait MapsTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments, deserialized from the call and advertised as the input schema.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Reduced result record.
    type Output: Serialize + Send + 'static;

    /// Validate `params`, call the provider once and shape the response.
    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>>;

    /// One-line text summary of a result.
    fn summarize(output: &Self::Output) -> String;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Execute the tool and convert the outcome into an MCP result.
    fn execute<'a>(params: Self::Params, api: &'a dyn MapsApi) -> BoxFuture<'a, CallToolResult> {
        async move { into_call_result(Self::run(params, api).await, Self::summarize) }.boxed()
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    fn create_route<S>(api: Arc<dyn MapsApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move {
                let params: Self::Params = parse_arguments(args)?;
                Ok::<_, McpError>(Self::execute(params, api.as_ref()).await)
            }
            .boxed()
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    fn http_handler<'a>(
        arguments: serde_json::Value,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<serde_json::Value, String>> {
        async move {
            let params: Self::Params = serde_json::from_value(arguments)
                .map_err(|e| format!("Invalid parameters: {}", e))?;
            let result = Self::execute(params, api).await;
            Ok::<_, String>(super::definitions::common::http_response(result))
        }
        .boxed()
    }
}
