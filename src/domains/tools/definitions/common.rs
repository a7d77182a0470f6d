//! Common utilities shared across the maps tools.
//!
//! Argument validation, result limits and the conversion of tool outcomes
//! into MCP results.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::maps::{LatLng, LocationInput};
use crate::domains::tools::ToolError;

/// Provider page size; no tool returns more places than this.
pub const MAX_RESULTS: usize = 20;

/// Largest search radius the provider accepts, in meters.
pub const MAX_RADIUS_METERS: f64 = 50_000.0;

/// Default limit for place results.
pub fn default_limit() -> usize {
    10
}

/// Validate and clamp limit to allowed range (1-20).
pub fn validate_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_RESULTS)
}

/// Trim a required text argument, rejecting blank values.
pub fn require_text(field: &str, value: &str) -> Result<String, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "'{field}' must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text argument; blank values become `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check a coordinate pair is finite and in range.
pub fn validate_coordinates(field: &str, coords: &LatLng) -> Result<LatLng, ToolError> {
    if coords.is_valid() {
        Ok(*coords)
    } else {
        Err(ToolError::invalid_arguments(format!(
            "'{field}' must have latitude in [-90, 90] and longitude in [-180, 180], got ({}, {})",
            coords.lat, coords.lng
        )))
    }
}

/// Validate a location descriptor and format it for the provider.
pub fn validate_location(field: &str, location: &LocationInput) -> Result<String, ToolError> {
    match location {
        LocationInput::Address(address) => require_text(field, address),
        LocationInput::Coordinates(coords) => {
            validate_coordinates(field, coords).map(|c| c.to_param())
        }
    }
}

/// Validate a search radius and round it to whole meters.
pub fn validate_radius(radius: f64) -> Result<u32, ToolError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ToolError::invalid_arguments(format!(
            "'radius' must be a positive distance in meters, got {radius}"
        )));
    }
    if radius > MAX_RADIUS_METERS {
        return Err(ToolError::invalid_arguments(format!(
            "'radius' must not exceed {MAX_RADIUS_METERS} meters, got {radius}"
        )));
    }
    Ok((radius.round() as u32).max(1))
}

/// Deserialize tool arguments, mapping failures to `invalid_params`.
pub fn parse_arguments<P: DeserializeOwned>(
    arguments: serde_json::Map<String, serde_json::Value>,
) -> Result<P, McpError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Create a success result with a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&ToolError::internal(format!(
            "Failed to serialize tool result: {e}"
        ))),
    }
}

/// Create an error result carrying the error kind.
pub fn error_result(error: &ToolError) -> CallToolResult {
    warn!("{}", error);
    CallToolResult {
        content: vec![Content::text(error.to_string())],
        structured_content: Some(serde_json::json!({
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
            }
        })),
        is_error: Some(true),
        meta: None,
    }
}

/// Turn a tool outcome into an MCP result.
pub fn into_call_result<T: Serialize>(
    outcome: Result<T, ToolError>,
    summarize: impl FnOnce(&T) -> String,
) -> CallToolResult {
    match outcome {
        Ok(data) => structured_result(summarize(&data), &data),
        Err(e) => error_result(&e),
    }
}

/// Render a tool result as the JSON body of an HTTP `tools/call` response.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> serde_json::Value {
    let mut response = serde_json::Map::new();
    response.insert(
        "content".to_string(),
        serde_json::to_value(&result.content).unwrap_or_default(),
    );
    response.insert(
        "isError".to_string(),
        serde_json::Value::Bool(result.is_error.unwrap_or(false)),
    );
    if let Some(structured) = result.structured_content {
        response.insert("structuredContent".to_string(), structured);
    }
    serde_json::Value::Object(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::MapsError;

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(10), 10);
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(200), 20);
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("query", "  cafe ").unwrap(), "cafe");
        assert!(matches!(
            require_text("query", "   "),
            Err(ToolError::InvalidArguments(msg)) if msg.contains("'query'")
        ));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" bakery ")), Some("bakery".to_string()));
        assert_eq!(optional_text(Some("")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_validate_radius() {
        assert_eq!(validate_radius(1500.0).unwrap(), 1500);
        assert_eq!(validate_radius(0.4).unwrap(), 1);
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(-5.0).is_err());
        assert!(validate_radius(f64::NAN).is_err());
        assert!(validate_radius(50_001.0).is_err());
    }

    #[test]
    fn test_validate_location() {
        let address = LocationInput::Address(" Waterloo, ON ".to_string());
        assert_eq!(validate_location("origin", &address).unwrap(), "Waterloo, ON");

        let coords = LocationInput::Coordinates(LatLng::new(43.47, -80.54));
        assert_eq!(validate_location("origin", &coords).unwrap(), "43.47,-80.54");

        let bad = LocationInput::Coordinates(LatLng::new(120.0, 0.0));
        assert!(validate_location("origin", &bad).is_err());
        assert!(validate_location("origin", &LocationInput::Address(String::new())).is_err());
    }

    #[test]
    fn test_error_result_reports_kind() {
        let result = error_result(&ToolError::from(MapsError::RateLimited));
        assert_eq!(result.is_error, Some(true));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["error"]["kind"], "upstream");
    }

    #[test]
    fn test_into_call_result_success() {
        let outcome: Result<Vec<u32>, ToolError> = Ok(vec![1, 2]);
        let result = into_call_result(outcome, |v| format!("{} item(s)", v.len()));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(serde_json::json!([1, 2])));
    }
}
