//! MCP Server implementation and lifecycle management.
//!
//! The server handler owns the shared upstream client and the tool router.
//! It exposes tools only; there are no resources or prompts.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool implements `MapsTool`, which derives the rmcp route (STDIO/TCP)
//! and the HTTP handler (via `ToolRegistry`) from `run()` and `summarize()`.
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use crate::domains::maps::{GoogleMapsClient, MapsApi};
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
///
/// Cloning is cheap: configuration and the upstream client are shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Upstream mapping client, constructed once and shared by every tool.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    maps: Arc<dyn MapsApi>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by the Google Maps web services.
    pub fn new(config: Config) -> super::error::Result<Self> {
        config.validate()?;

        if !config.has_api_key() {
            warn!("Starting without an API key; tool calls will report an upstream error");
        }

        let client = GoogleMapsClient::from_config(&config)?;
        Ok(Self::with_maps_api(config, Arc::new(client)))
    }

    /// Create a server around an existing upstream client.
    pub fn with_maps_api(config: Config, maps: Arc<dyn MapsApi>) -> Self {
        info!("Registering maps tools");
        Self {
            tool_router: build_tool_router::<Self>(maps.clone()),
            config: Arc::new(config),
            maps,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    #[tracing::instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.maps.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Google Maps tools. Use get_geocode to turn addresses into coordinates, \
                 get_directions and get_distance for routing, find_place and place_nearby \
                 to search places, and place_details with a place ID from a search for \
                 phone numbers, websites and opening hours. Locations are addresses or \
                 {lat, lng} objects; radii are in meters."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
