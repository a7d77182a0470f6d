//! Geocoding tool.
//!
//! Resolves a free-form address into candidate matches with coordinates.

use futures::FutureExt;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::maps::payload::{GeocodeEntry, GeocodeResponse, Lookup};
use crate::domains::maps::{LatLng, MapsApi, MapsError};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::require_text;
use crate::domains::tools::handlers::MapsTool;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the geocoding tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGeocodeParams {
    #[schemars(description = "Address or place name to geocode, e.g. '1600 Amphitheatre Parkway, Mountain View, CA'")]
    pub address: String,
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// Structured output for a geocoding lookup.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct GeocodeResult {
    pub address: String,
    /// Best match first; empty when nothing matched.
    pub candidates: Vec<GeocodeCandidate>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub location: LatLng,
    pub place_id: String,
    pub types: Vec<String>,
}

impl From<GeocodeEntry> for GeocodeCandidate {
    fn from(entry: GeocodeEntry) -> Self {
        Self {
            formatted_address: entry.formatted_address,
            location: entry.geometry.location,
            place_id: entry.place_id,
            types: entry.types,
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Geocoding tool - address to coordinates.
pub struct GetGeocodeTool;

impl GetGeocodeTool {
    pub fn shape(address: &str, response: GeocodeResponse) -> Result<GeocodeResult, MapsError> {
        let candidates = match response
            .status
            .classify(response.error_message.as_deref())?
        {
            Lookup::Found => response.results.into_iter().map(Into::into).collect(),
            Lookup::Empty => Vec::new(),
        };

        Ok(GeocodeResult {
            address: address.to_string(),
            candidates,
        })
    }
}

impl MapsTool for GetGeocodeTool {
    const NAME: &'static str = "get_geocode";

    const DESCRIPTION: &'static str = "Convert an address or place name into geographic \
         coordinates. Returns candidate matches (best first) with formatted address, \
         latitude/longitude, place ID and types. An empty candidate list means no match.";

    type Params = GetGeocodeParams;
    type Output = GeocodeResult;

    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>> {
        async move {
            let address = require_text("address", &params.address)?;
            info!("Geocoding '{}'", address);

            let response = api.geocode(&address).await?;
            Ok(Self::shape(&address, response)?)
        }
        .boxed()
    }

    fn summarize(output: &Self::Output) -> String {
        match output.candidates.first() {
            Some(best) => format!(
                "'{}' -> {} ({}) [{} candidate(s)]",
                output.address,
                best.formatted_address,
                best.location,
                output.candidates.len()
            ),
            None => format!("No geocoding match for '{}'", output.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::testing::{RecordedCall, StubMapsApi};
    use serde_json::json;
    use tokio_test::assert_ok;

    const GOOGLEPLEX: &str = "1600 Amphitheatre Parkway, Mountain View, CA";

    fn googleplex_body() -> serde_json::Value {
        json!({
            "status": "OK",
            "results": [{
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
                "geometry": {
                    "location": {"lat": 37.4224764, "lng": -122.0842499},
                    "location_type": "ROOFTOP"
                },
                "place_id": "ChIJ2eUgeAK6j4ARbn5u_wAGqWA",
                "types": ["street_address"]
            }]
        })
    }

    fn assert_near_googleplex(location: &LatLng) {
        assert!((location.lat - 37.422).abs() < 0.01, "lat {}", location.lat);
        assert!((location.lng - -122.084).abs() < 0.01, "lng {}", location.lng);
    }

    #[tokio::test]
    async fn test_geocode_googleplex() {
        let api = StubMapsApi::new().with_response(format!("geocode:{GOOGLEPLEX}"), googleplex_body());

        let params = GetGeocodeParams {
            address: format!("  {GOOGLEPLEX} "),
        };
        let result = assert_ok!(GetGeocodeTool::run(params, &api).await);

        assert!(!result.candidates.is_empty());
        assert_near_googleplex(&result.candidates[0].location);
        assert_eq!(result.candidates[0].place_id, "ChIJ2eUgeAK6j4ARbn5u_wAGqWA");
        assert_eq!(api.calls(), vec![RecordedCall::Geocode(GOOGLEPLEX.to_string())]);
    }

    #[tokio::test]
    async fn test_nonexistent_address_is_empty() {
        let api = StubMapsApi::new();
        let params = GetGeocodeParams {
            address: "this is not a place".to_string(),
        };

        let result = assert_ok!(GetGeocodeTool::run(params, &api).await);
        assert!(result.candidates.is_empty());
        assert_eq!(
            GetGeocodeTool::summarize(&result),
            "No geocoding match for 'this is not a place'"
        );
    }

    #[tokio::test]
    async fn test_blank_address_rejected() {
        let api = StubMapsApi::new();
        let params = GetGeocodeParams {
            address: " ".to_string(),
        };

        let result = GetGeocodeTool::execute(params, &api).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content.unwrap()["error"]["kind"],
            "invalid_arguments"
        );
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_upstream() {
        let api = StubMapsApi::new().failing(MapsError::MissingApiKey);
        let params = GetGeocodeParams {
            address: GOOGLEPLEX.to_string(),
        };

        let result = GetGeocodeTool::run(params, &api).await;
        assert!(matches!(
            result,
            Err(ToolError::Upstream(MapsError::MissingApiKey))
        ));
    }

    // Integration test (requires network and GOOGLE_MAPS_API_KEY, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_live_geocode_googleplex() {
        let config = crate::core::Config::from_env();
        let api = crate::domains::maps::GoogleMapsClient::from_config(&config).unwrap();
        let params = GetGeocodeParams {
            address: GOOGLEPLEX.to_string(),
        };

        let result = GetGeocodeTool::run(params, &api).await.unwrap();
        assert!(!result.candidates.is_empty());
        assert_near_googleplex(&result.candidates[0].location);
    }
}
