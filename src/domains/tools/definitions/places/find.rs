//! Find place tool.
//!
//! Text or phone number search, optionally biased towards a location.

use futures::FutureExt;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{PlaceSummary, format_place_list, summarize_places};
use crate::domains::maps::model::{FindPlaceRequest, LocationBias};
use crate::domains::maps::payload::Lookup;
use crate::domains::maps::{InputType, LatLng, MapsApi};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    default_limit, require_text, validate_coordinates, validate_limit, validate_radius,
};
use crate::domains::tools::handlers::MapsTool;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the find place tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindPlaceParams {
    #[schemars(description = "Place name, address, category or phone number to search for")]
    pub query: String,

    #[schemars(description = "How to read the query: textquery (default) or phonenumber (international format, e.g. +14155552671)")]
    #[serde(default)]
    pub input_type: InputType,

    #[schemars(description = "Optional center {\"lat\": .., \"lng\": ..} to bias results towards")]
    pub location: Option<LatLng>,

    #[schemars(description = "Optional bias radius in meters around 'location' (1-50000)")]
    pub radius: Option<f64>,

    #[schemars(description = "Maximum number of places to return (default: 10, max: 20)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// Structured output for a find place search.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FindPlaceResult {
    pub query: String,
    /// Provider order, at most `limit` entries.
    pub places: Vec<PlaceSummary>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Find place tool - search places by text or phone number.
pub struct FindPlaceTool;

impl FindPlaceTool {
    /// Validate the arguments into an upstream request.
    pub fn build_request(params: &FindPlaceParams) -> Result<FindPlaceRequest, ToolError> {
        let input = require_text("query", &params.query)?;

        let location_bias = match (params.location.as_ref(), params.radius) {
            (None, None) => None,
            (None, Some(_)) => {
                return Err(ToolError::invalid_arguments(
                    "'radius' requires 'location' to be set",
                ));
            }
            (Some(center), None) => Some(LocationBias::Point(validate_coordinates(
                "location", center,
            )?)),
            (Some(center), Some(radius)) => Some(LocationBias::Circle {
                center: validate_coordinates("location", center)?,
                radius_meters: validate_radius(radius)?,
            }),
        };

        Ok(FindPlaceRequest {
            input,
            input_type: params.input_type,
            location_bias,
        })
    }
}

impl MapsTool for FindPlaceTool {
    const NAME: &'static str = "find_place";

    const DESCRIPTION: &'static str = "Find places matching a text query (name, address or \
         category) or a phone number. Optionally bias results towards a {lat, lng} location, \
         within 'radius' meters when given. Returns place summaries with place ID, name, \
         address, rating and coordinates. Use place_details with a place ID for more.";

    type Params = FindPlaceParams;
    type Output = FindPlaceResult;

    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>> {
        async move {
            let request = Self::build_request(&params)?;
            let limit = validate_limit(params.limit);

            info!(
                "Finding place '{}' ({})",
                request.input,
                request.input_type.as_str()
            );

            let response = api.find_place(&request).await?;
            let places = match response
                .status
                .classify(response.error_message.as_deref())?
            {
                Lookup::Found => summarize_places(response.candidates, limit),
                Lookup::Empty => Vec::new(),
            };

            Ok(FindPlaceResult {
                query: request.input,
                places,
            })
        }
        .boxed()
    }

    fn summarize(output: &Self::Output) -> String {
        if output.places.is_empty() {
            return format!("No places found for '{}'", output.query);
        }
        format_place_list(
            format!(
                "Found {} place(s) for '{}':",
                output.places.len(),
                output.query
            ),
            &output.places,
        )
    }
}
