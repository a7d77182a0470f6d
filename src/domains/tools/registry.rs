//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::MapsTool;
use super::definitions::{
    FindPlaceTool, GetDirectionsTool, GetDistanceTool, GetGeocodeTool, PlaceDetailsTool,
    PlaceNearbyTool,
};
use crate::domains::maps::MapsApi;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    api: Arc<dyn MapsApi>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by `api`.
    pub fn new(api: Arc<dyn MapsApi>) -> Self {
        Self { api }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetDirectionsTool::NAME,
            GetDistanceTool::NAME,
            GetGeocodeTool::NAME,
            FindPlaceTool::NAME,
            PlaceNearbyTool::NAME,
            PlaceDetailsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetDirectionsTool::to_tool(),
            GetDistanceTool::to_tool(),
            GetGeocodeTool::to_tool(),
            FindPlaceTool::to_tool(),
            PlaceNearbyTool::to_tool(),
            PlaceDetailsTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let api = self.api.as_ref();
        match name {
            GetDirectionsTool::NAME => GetDirectionsTool::http_handler(arguments, api).await,
            GetDistanceTool::NAME => GetDistanceTool::http_handler(arguments, api).await,
            GetGeocodeTool::NAME => GetGeocodeTool::http_handler(arguments, api).await,
            FindPlaceTool::NAME => FindPlaceTool::http_handler(arguments, api).await,
            PlaceNearbyTool::NAME => PlaceNearbyTool::http_handler(arguments, api).await,
            PlaceDetailsTool::NAME => PlaceDetailsTool::http_handler(arguments, api).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(super::ToolError::not_found(name).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::testing::StubMapsApi;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(StubMapsApi::new()))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"get_directions"));
        assert!(names.contains(&"get_distance"));
        assert!(names.contains(&"get_geocode"));
        assert!(names.contains(&"find_place"));
        assert!(names.contains(&"place_nearby"));
        assert!(names.contains(&"place_details"));
    }

    #[test]
    fn test_get_all_tools_matches_names() {
        let tools = ToolRegistry::get_all_tools();
        let names = test_registry().tool_names();
        assert_eq!(tools.len(), names.len());
        for (tool, name) in tools.iter().zip(names) {
            assert_eq!(tool.name, name);
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_geocode() {
        let registry = test_registry();
        let result = registry
            .call_tool("get_geocode", serde_json::json!({ "address": "nowhere at all" }))
            .await
            .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["candidates"], serde_json::json!([]));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_invalid_params() {
        let registry = test_registry();
        let result = registry
            .call_tool("get_directions", serde_json::json!({ "origin": "A", "destination": "B", "mode": "teleport" }))
            .await;
        assert!(matches!(result, Err(msg) if msg.starts_with("Invalid parameters")));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = test_registry();
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }
}
