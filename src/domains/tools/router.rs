//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool knows how to create its own route; the shared upstream client
//! is handed to every route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::MapsTool;
use super::definitions::{
    FindPlaceTool, GetDirectionsTool, GetDistanceTool, GetGeocodeTool, PlaceDetailsTool,
    PlaceNearbyTool,
};
use crate::domains::maps::MapsApi;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn MapsApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetDirectionsTool::create_route(api.clone()))
        .with_route(GetDistanceTool::create_route(api.clone()))
        .with_route(GetGeocodeTool::create_route(api.clone()))
        .with_route(FindPlaceTool::create_route(api.clone()))
        .with_route(PlaceNearbyTool::create_route(api.clone()))
        .with_route(PlaceDetailsTool::create_route(api))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::maps::testing::StubMapsApi;

    struct TestServer {}

    fn stub_api() -> Arc<dyn MapsApi> {
        Arc::new(StubMapsApi::new())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(stub_api());
        let tools = router.list_all();
        assert_eq!(tools.len(), 6);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        for expected in [
            "get_directions",
            "get_distance",
            "get_geocode",
            "find_place",
            "place_nearby",
            "place_details",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_tools_advertise_schemas() {
        let router: ToolRouter<TestServer> = build_tool_router(stub_api());
        for tool in router.list_all() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert!(
                tool.input_schema.contains_key("properties"),
                "{} has no parameter schema",
                tool.name
            );
        }
    }

    #[test]
    fn test_registry_matches_router() {
        let api = stub_api();
        let registry = ToolRegistry::new(api.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(api);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
