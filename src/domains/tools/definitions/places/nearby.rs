//! Nearby places tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{PlaceSummary, format_place_list, summarize_places};
use crate::domains::maps::model::NearbySearchRequest;
use crate::domains::maps::payload::Lookup;
use crate::domains::maps::{LatLng, MapsApi};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    default_limit, optional_text, validate_coordinates, validate_limit, validate_radius,
};
use crate::domains::tools::handlers::MapsTool;

/// Parameters for the nearby places tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaceNearbyParams {
    #[schemars(description = "Search center {\"lat\": .., \"lng\": ..}")]
    pub location: LatLng,

    #[schemars(description = "Search radius in meters (1-50000)")]
    pub radius: f64,

    #[schemars(description = "Optional keyword matched against names, types and content (e.g. 'vegan')")]
    pub keyword: Option<String>,

    #[schemars(description = "Optional place type filter (e.g. 'restaurant', 'pharmacy')")]
    #[serde(rename = "type")]
    pub place_type: Option<String>,

    #[schemars(description = "Maximum number of places to return (default: 10, max: 20)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Structured output for a nearby search.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaceNearbyResult {
    pub location: LatLng,
    /// Effective radius in meters.
    pub radius: u32,
    pub places: Vec<PlaceSummary>,
}

/// Nearby places tool - places within a radius, in provider relevance order.
pub struct PlaceNearbyTool;

impl PlaceNearbyTool {
    pub fn build_request(params: &PlaceNearbyParams) -> Result<NearbySearchRequest, ToolError> {
        Ok(NearbySearchRequest {
            location: validate_coordinates("location", &params.location)?,
            radius_meters: validate_radius(params.radius)?,
            keyword: optional_text(params.keyword.as_deref()),
            place_type: optional_text(params.place_type.as_deref()),
        })
    }
}

impl MapsTool for PlaceNearbyTool {
    const NAME: &'static str = "place_nearby";

    const DESCRIPTION: &'static str = "Search for places within 'radius' meters of a {lat, lng} \
         location, optionally filtered by keyword and place type (e.g. restaurant, cafe, \
         pharmacy). Results keep the provider's relevance order.";

    type Params = PlaceNearbyParams;
    type Output = PlaceNearbyResult;

    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>> {
        async move {
            let request = Self::build_request(&params)?;
            let limit = validate_limit(params.limit);

            info!(
                "Nearby search at {} within {} m",
                request.location, request.radius_meters
            );

            let response = api.places_nearby(&request).await?;
            let places = match response
                .status
                .classify(response.error_message.as_deref())?
            {
                Lookup::Found => summarize_places(response.results, limit),
                Lookup::Empty => Vec::new(),
            };

            Ok(PlaceNearbyResult {
                location: request.location,
                radius: request.radius_meters,
                places,
            })
        }
        .boxed()
    }

    fn summarize(output: &Self::Output) -> String {
        if output.places.is_empty() {
            return format!(
                "No places found within {} m of {}",
                output.radius, output.location
            );
        }
        format_place_list(
            format!(
                "Found {} place(s) within {} m of {}:",
                output.places.len(),
                output.radius,
                output.location
            ),
            &output.places,
        )
    }
}
