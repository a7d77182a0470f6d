//! Distance matrix tool.
//!
//! Travel distance and time for every origin/destination pair, fetched in a
//! single upstream request.

use futures::FutureExt;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Measure;
use crate::domains::maps::model::DistanceMatrixRequest;
use crate::domains::maps::payload::{ApiStatus, DistanceMatrixResponse, Lookup, MatrixElement};
use crate::domains::maps::{LocationInput, MapsApi, MapsError, TravelMode};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::validate_location;
use crate::domains::tools::handlers::MapsTool;

/// Most origins or destinations a single request may carry.
pub const MAX_MATRIX_SIDE: usize = 25;

/// Most origin/destination pairs a single request may carry.
pub const MAX_MATRIX_CELLS: usize = 100;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the distance matrix tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDistanceParams {
    /// One or more starting points.
    #[schemars(description = "Starting points: addresses or {\"lat\": .., \"lng\": ..} objects (1-25)")]
    pub origins: Vec<LocationInput>,

    /// One or more end points.
    #[schemars(description = "End points: addresses or {\"lat\": .., \"lng\": ..} objects (1-25)")]
    pub destinations: Vec<LocationInput>,

    #[schemars(description = "Travel mode: driving, walking, bicycling or transit (default: driving)")]
    #[serde(default)]
    pub mode: TravelMode,
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// Structured output for a distance matrix lookup.
///
/// `rows` always has one entry per origin, and every row one element per
/// destination, in request order.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DistanceResult {
    pub mode: TravelMode,
    /// Origins as resolved by the provider (falls back to the request text).
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub rows: Vec<DistanceRow>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DistanceRow {
    pub origin: String,
    pub elements: Vec<DistanceCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Ok,
    NotFound,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DistanceCell {
    pub destination: String,
    pub status: CellStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Measure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Measure>,
}

impl DistanceCell {
    fn not_found(destination: &str) -> Self {
        Self {
            destination: destination.to_string(),
            status: CellStatus::NotFound,
            distance: None,
            duration: None,
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Distance matrix tool - N x M travel distances and durations.
pub struct GetDistanceTool;

impl GetDistanceTool {
    fn validate_side(field: &str, locations: &[LocationInput]) -> Result<Vec<String>, ToolError> {
        if locations.is_empty() {
            return Err(ToolError::invalid_arguments(format!(
                "'{field}' must contain at least one location"
            )));
        }
        if locations.len() > MAX_MATRIX_SIDE {
            return Err(ToolError::invalid_arguments(format!(
                "'{field}' accepts at most {MAX_MATRIX_SIDE} locations, got {}",
                locations.len()
            )));
        }
        locations
            .iter()
            .enumerate()
            .map(|(i, loc)| {
                let entry = format!("{field}[{i}]");
                let value = validate_location(&entry, loc)?;
                // '|' separates entries in the upstream query.
                if value.contains('|') {
                    return Err(ToolError::invalid_arguments(format!(
                        "'{entry}' must not contain '|'"
                    )));
                }
                Ok(value)
            })
            .collect()
    }

    /// Build the full matrix, padding anything the provider left out.
    pub fn shape(
        request: &DistanceMatrixRequest,
        response: DistanceMatrixResponse,
    ) -> Result<DistanceResult, MapsError> {
        let lookup = response
            .status
            .classify(response.error_message.as_deref())?;

        let (origin_addresses, destination_addresses, mut upstream_rows) = match lookup {
            Lookup::Found => (
                response.origin_addresses,
                response.destination_addresses,
                response.rows,
            ),
            Lookup::Empty => (Vec::new(), Vec::new(), Vec::new()),
        };

        let origins = resolve_names(&request.origins, &origin_addresses);
        let destinations = resolve_names(&request.destinations, &destination_addresses);

        if upstream_rows.len() != origins.len() {
            debug!(
                "Distance matrix returned {} row(s) for {} origin(s)",
                upstream_rows.len(),
                origins.len()
            );
        }
        upstream_rows.resize_with(origins.len(), Default::default);

        let rows = origins
            .iter()
            .zip(upstream_rows)
            .map(|(origin, row)| {
                let mut elements = row.elements.into_iter();
                let cells = destinations
                    .iter()
                    .map(|destination| match elements.next() {
                        Some(element) => shape_cell(destination, element),
                        None => DistanceCell::not_found(destination),
                    })
                    .collect();
                DistanceRow {
                    origin: origin.clone(),
                    elements: cells,
                }
            })
            .collect();

        Ok(DistanceResult {
            mode: request.mode,
            origins,
            destinations,
            rows,
        })
    }
}

/// Provider-resolved names where available, request text otherwise.
fn resolve_names(requested: &[String], resolved: &[String]) -> Vec<String> {
    requested
        .iter()
        .enumerate()
        .map(|(i, req)| {
            resolved
                .get(i)
                .filter(|name| !name.is_empty())
                .unwrap_or(req)
                .clone()
        })
        .collect()
}

fn shape_cell(destination: &str, element: MatrixElement) -> DistanceCell {
    match (element.status, element.distance, element.duration) {
        (ApiStatus::Ok, distance, duration) if distance.is_some() || duration.is_some() => {
            DistanceCell {
                destination: destination.to_string(),
                status: CellStatus::Ok,
                distance: distance.map(Measure::from),
                duration: duration.map(Measure::from),
            }
        }
        _ => DistanceCell::not_found(destination),
    }
}

impl MapsTool for GetDistanceTool {
    const NAME: &'static str = "get_distance";

    const DESCRIPTION: &'static str = "Calculate travel distance and duration between each of \
         the given origins and destinations. Locations can be addresses or {lat, lng} \
         coordinates (up to 25 of each, at most 100 pairs). Returns one row per origin with one \
         element per destination; unreachable pairs are marked not_found instead of failing.";

    type Params = GetDistanceParams;
    type Output = DistanceResult;

    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>> {
        async move {
            let origins = Self::validate_side("origins", &params.origins)?;
            let destinations = Self::validate_side("destinations", &params.destinations)?;

            let cells = origins.len() * destinations.len();
            if cells > MAX_MATRIX_CELLS {
                return Err(ToolError::invalid_arguments(format!(
                    "At most {MAX_MATRIX_CELLS} origin/destination pairs per call, got {cells}"
                )));
            }

            let request = DistanceMatrixRequest {
                origins,
                destinations,
                mode: params.mode,
            };

            info!(
                "Distance matrix {}x{} ({})",
                request.origins.len(),
                request.destinations.len(),
                request.mode
            );

            let response = api.distance_matrix(&request).await?;
            Ok(Self::shape(&request, response)?)
        }
        .boxed()
    }

    fn summarize(output: &Self::Output) -> String {
        let total: usize = output.rows.iter().map(|r| r.elements.len()).sum();
        let found = output
            .rows
            .iter()
            .flat_map(|r| &r.elements)
            .filter(|c| c.status == CellStatus::Ok)
            .count();

        if total == 1 && found == 1 {
            let cell = &output.rows[0].elements[0];
            let distance = cell.distance.as_ref().map(|d| d.text.as_str()).unwrap_or("?");
            let duration = cell.duration.as_ref().map(|d| d.text.as_str()).unwrap_or("?");
            return format!(
                "{} from '{}' to '{}': {}, {}",
                output.mode, output.rows[0].origin, cell.destination, distance, duration
            );
        }

        format!(
            "{} distance matrix {}x{}: {} of {} pair(s) reachable",
            output.mode,
            output.origins.len(),
            output.destinations.len(),
            found,
            total
        )
    }
}
