//! Directions tool.
//!
//! Step-by-step route between two locations for a given travel mode.

use futures::FutureExt;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Measure;
use crate::domains::maps::model::DirectionsRequest;
use crate::domains::maps::payload::{DirectionsResponse, Leg, Lookup, Step};
use crate::domains::maps::{LocationInput, MapsApi, MapsError, TravelMode};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::validate_location;
use crate::domains::tools::handlers::MapsTool;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the directions tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDirectionsParams {
    /// Starting point: address string or {"lat", "lng"} coordinates.
    #[schemars(description = "Starting point: an address or {\"lat\": .., \"lng\": ..}")]
    pub origin: LocationInput,

    /// End point: address string or {"lat", "lng"} coordinates.
    #[schemars(description = "Destination: an address or {\"lat\": .., \"lng\": ..}")]
    pub destination: LocationInput,

    /// Travel mode (default: driving).
    #[schemars(description = "Travel mode: driving, walking, bicycling or transit (default: driving)")]
    #[serde(default)]
    pub mode: TravelMode,
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// Structured output for a directions lookup.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DirectionsResult {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    /// Provider's short route description (e.g. "ON-401 E").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub total_distance_meters: u64,
    pub total_duration_seconds: u64,
    /// Empty when no route exists.
    pub legs: Vec<RouteLeg>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance: Option<Measure>,
    pub duration: Option<Measure>,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RouteStep {
    /// Provider instruction, HTML markup included.
    pub instruction: String,
    pub distance: Option<Measure>,
    pub duration: Option<Measure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_mode: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Directions tool - route legs and steps between two locations.
pub struct GetDirectionsTool;

impl GetDirectionsTool {
    /// Reduce the provider response to the first route's legs.
    pub fn shape(
        request: &DirectionsRequest,
        response: DirectionsResponse,
    ) -> Result<DirectionsResult, MapsError> {
        let lookup = response
            .status
            .classify(response.error_message.as_deref())?;

        let route = match lookup {
            Lookup::Found => response.routes.into_iter().next(),
            Lookup::Empty => None,
        };

        let (summary, legs, warnings) = match route {
            Some(route) => (
                Some(route.summary).filter(|s| !s.is_empty()),
                route.legs.into_iter().map(Self::shape_leg).collect::<Vec<_>>(),
                route.warnings,
            ),
            None => (None, Vec::new(), Vec::new()),
        };

        let total_distance_meters = legs
            .iter()
            .filter_map(|l| l.distance.as_ref())
            .map(|d| d.value)
            .sum();
        let total_duration_seconds = legs
            .iter()
            .filter_map(|l| l.duration.as_ref())
            .map(|d| d.value)
            .sum();

        Ok(DirectionsResult {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            mode: request.mode,
            summary,
            total_distance_meters,
            total_duration_seconds,
            legs,
            warnings,
        })
    }

    fn shape_leg(leg: Leg) -> RouteLeg {
        RouteLeg {
            start_address: leg.start_address,
            end_address: leg.end_address,
            distance: leg.distance.map(Measure::from),
            duration: leg.duration.map(Measure::from),
            steps: leg.steps.into_iter().map(Self::shape_step).collect(),
        }
    }

    fn shape_step(step: Step) -> RouteStep {
        RouteStep {
            instruction: step.html_instructions,
            distance: step.distance.map(Measure::from),
            duration: step.duration.map(Measure::from),
            travel_mode: step.travel_mode,
        }
    }
}

impl MapsTool for GetDirectionsTool {
    const NAME: &'static str = "get_directions";

    const DESCRIPTION: &'static str = "Get step-by-step directions from an origin to a destination. \
         Locations can be addresses, place names or {lat, lng} coordinates. Travel mode is one of \
         driving (default), walking, bicycling or transit. Returns the route legs with distance, \
         duration and ordered step instructions. An empty leg list means no route was found.";

    type Params = GetDirectionsParams;
    type Output = DirectionsResult;

    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>> {
        async move {
            let request = DirectionsRequest {
                origin: validate_location("origin", &params.origin)?,
                destination: validate_location("destination", &params.destination)?,
                mode: params.mode,
            };

            info!(
                "Directions from '{}' to '{}' ({})",
                request.origin, request.destination, request.mode
            );

            let response = api.directions(&request).await?;
            Ok(Self::shape(&request, response)?)
        }
        .boxed()
    }

    fn summarize(output: &Self::Output) -> String {
        if output.legs.is_empty() {
            return format!(
                "No {} route found from '{}' to '{}'",
                output.mode, output.origin, output.destination
            );
        }

        let step_count: usize = output.legs.iter().map(|l| l.steps.len()).sum();
        let distance = match output.legs.as_slice() {
            [leg] => leg
                .distance
                .as_ref()
                .map(|d| d.text.clone())
                .unwrap_or_else(|| format!("{} m", output.total_distance_meters)),
            _ => format!("{} m", output.total_distance_meters),
        };
        let duration = match output.legs.as_slice() {
            [leg] => leg
                .duration
                .as_ref()
                .map(|d| d.text.clone())
                .unwrap_or_else(|| format!("{} s", output.total_duration_seconds)),
            _ => format!("{} s", output.total_duration_seconds),
        };

        format!(
            "{} route from '{}' to '{}': {}, {} ({} step(s))",
            output.mode, output.origin, output.destination, distance, duration, step_count
        )
    }
}
