//! Place details tool.
//!
//! Expanded record for a place ID returned by `find_place` or `place_nearby`.

use futures::FutureExt;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domains::maps::payload::{
    ApiStatus, Lookup, OpeningHours, PlaceDetailsResponse, PlaceRecord,
};
use crate::domains::maps::{LatLng, MapsApi, MapsError};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::require_text;
use crate::domains::tools::handlers::MapsTool;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the place details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaceDetailsParams {
    #[schemars(description = "Place ID from find_place or place_nearby")]
    pub place_id: String,
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// Structured output for a details lookup.
///
/// `found` is false (and `place` absent) for unknown or expired IDs.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaceDetailsResult {
    pub place_id: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    /// International number when known, local format otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Hours>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Hours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    pub weekday_text: Vec<String>,
}

impl From<OpeningHours> for Hours {
    fn from(hours: OpeningHours) -> Self {
        Self {
            open_now: hours.open_now,
            weekday_text: hours.weekday_text,
        }
    }
}

impl From<PlaceRecord> for PlaceDetails {
    fn from(place: PlaceRecord) -> Self {
        Self {
            place_id: place.place_id,
            name: place.name,
            formatted_address: place.formatted_address.or(place.vicinity),
            location: place.geometry.map(|g| g.location),
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            phone_number: place
                .international_phone_number
                .or(place.formatted_phone_number),
            website: place.website,
            types: place.types,
            opening_hours: place.opening_hours.map(Hours::from),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Place details tool - expanded record for one place ID.
pub struct PlaceDetailsTool;

impl PlaceDetailsTool {
    pub fn shape(
        place_id: &str,
        response: PlaceDetailsResponse,
    ) -> Result<PlaceDetailsResult, MapsError> {
        // The provider rejects IDs it never issued with INVALID_REQUEST and
        // expired ones with NOT_FOUND; both mean the place is unknown.
        let lookup = match response.status {
            ApiStatus::InvalidRequest if !place_id.trim().is_empty() => {
                debug!(
                    "Place ID '{}' rejected by the provider: {}",
                    place_id,
                    response.error_message.as_deref().unwrap_or("no details provided")
                );
                Lookup::Empty
            }
            status => status.classify(response.error_message.as_deref())?,
        };

        let place = match lookup {
            Lookup::Found => response.result.map(PlaceDetails::from),
            Lookup::Empty => None,
        };

        Ok(PlaceDetailsResult {
            place_id: place_id.to_string(),
            found: place.is_some(),
            place,
        })
    }
}

impl MapsTool for PlaceDetailsTool {
    const NAME: &'static str = "place_details";

    const DESCRIPTION: &'static str = "Get detailed information about a place by its place ID \
         (from find_place or place_nearby): name, address, coordinates, rating, phone number, \
         website and opening hours. Unknown or expired IDs return found=false.";

    type Params = PlaceDetailsParams;
    type Output = PlaceDetailsResult;

    fn run<'a>(
        params: Self::Params,
        api: &'a dyn MapsApi,
    ) -> BoxFuture<'a, Result<Self::Output, ToolError>> {
        async move {
            let place_id = require_text("place_id", &params.place_id)?;
            info!("Fetching details for place {}", place_id);

            let response = api.place_details(&place_id).await?;
            Ok(Self::shape(&place_id, response)?)
        }
        .boxed()
    }

    fn summarize(output: &Self::Output) -> String {
        let Some(place) = &output.place else {
            return format!("No place found for ID '{}'", output.place_id);
        };

        let mut text = place.name.clone();
        if let Some(address) = &place.formatted_address {
            text.push_str(&format!(" - {address}"));
        }
        if let Some(rating) = place.rating {
            text.push_str(&format!("\nRating: {rating:.1}"));
            if let Some(total) = place.user_ratings_total {
                text.push_str(&format!(" ({total} reviews)"));
            }
        }
        if let Some(phone) = &place.phone_number {
            text.push_str(&format!("\nPhone: {phone}"));
        }
        if let Some(website) = &place.website {
            text.push_str(&format!("\nWebsite: {website}"));
        }
        if let Some(open_now) = place.opening_hours.as_ref().and_then(|h| h.open_now) {
            text.push_str(if open_now { "\nOpen now" } else { "\nClosed now" });
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::testing::{RecordedCall, StubMapsApi};
    use crate::domains::tools::definitions::places::{FindPlaceParams, FindPlaceTool};
    use serde_json::json;
    use tokio_test::assert_ok;

    const PLACE_ID: &str = "ChIJj61dQgK6j4AR4GeTYWZsKWw";

    fn details_body() -> serde_json::Value {
        json!({
            "status": "OK",
            "html_attributions": [],
            "result": {
                "place_id": PLACE_ID,
                "name": "Googleplex",
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
                "geometry": {"location": {"lat": 37.4220656, "lng": -122.0840897}},
                "rating": 4.5,
                "user_ratings_total": 12000,
                "formatted_phone_number": "(650) 253-0000",
                "international_phone_number": "+1 650-253-0000",
                "website": "https://about.google/",
                "types": ["point_of_interest", "establishment"],
                "opening_hours": {
                    "open_now": true,
                    "weekday_text": ["Monday: 9:00 AM - 5:00 PM"]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_details_name_matches_find_place_summary() {
        let api = StubMapsApi::new()
            .with_response(
                "findplace",
                json!({
                    "status": "OK",
                    "candidates": [{
                        "place_id": PLACE_ID,
                        "name": "Googleplex",
                        "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA"
                    }]
                }),
            )
            .with_response(format!("details:{PLACE_ID}"), details_body());

        let search: FindPlaceParams =
            serde_json::from_value(json!({"query": "Googleplex"})).unwrap();
        let found = assert_ok!(FindPlaceTool::run(search, &api).await);
        let summary = &found.places[0];

        let params = PlaceDetailsParams {
            place_id: summary.place_id.clone(),
        };
        let details = assert_ok!(PlaceDetailsTool::run(params, &api).await);

        assert!(details.found);
        let place = details.place.unwrap();
        assert_eq!(place.name, summary.name);
        assert_eq!(place.phone_number.as_deref(), Some("+1 650-253-0000"));
        assert_eq!(place.opening_hours.unwrap().open_now, Some(true));
        assert_eq!(api.calls()[1], RecordedCall::PlaceDetails(PLACE_ID.to_string()));
    }

    #[tokio::test]
    async fn test_unknown_place_id_not_found() {
        let api = StubMapsApi::new()
            .with_response("details", json!({"status": "NOT_FOUND", "html_attributions": []}));
        let params = PlaceDetailsParams {
            place_id: "expired-id".to_string(),
        };

        let result = assert_ok!(PlaceDetailsTool::run(params, &api).await);
        assert!(!result.found);
        assert!(result.place.is_none());
        assert_eq!(
            PlaceDetailsTool::summarize(&result),
            "No place found for ID 'expired-id'"
        );
    }

    #[tokio::test]
    async fn test_made_up_place_id_not_found() {
        let api = StubMapsApi::new().with_response(
            "details",
            json!({"status": "INVALID_REQUEST", "error_message": "Invalid 'placeid' parameter."}),
        );
        let params = PlaceDetailsParams {
            place_id: "not-a-real-id".to_string(),
        };

        let result = assert_ok!(PlaceDetailsTool::run(params, &api).await);
        assert!(!result.found);
        assert!(result.place.is_none());
    }

    async fn details_error(status: &str) -> ToolError {
        let api = StubMapsApi::new()
            .with_response("details", json!({"status": status, "error_message": "nope"}));
        let params = PlaceDetailsParams {
            place_id: PLACE_ID.to_string(),
        };
        tokio_test::assert_err!(PlaceDetailsTool::run(params, &api).await)
    }

    #[tokio::test]
    async fn test_quota_and_denied_stay_upstream() {
        assert!(matches!(
            details_error("OVER_QUERY_LIMIT").await,
            ToolError::Upstream(MapsError::QuotaExceeded(_))
        ));
        assert!(matches!(
            details_error("REQUEST_DENIED").await,
            ToolError::Upstream(MapsError::Denied(_))
        ));
        assert!(matches!(
            details_error("UNKNOWN_ERROR").await,
            ToolError::Upstream(MapsError::Service { .. })
        ));
    }

    #[tokio::test]
    async fn test_execute_structured_output() {
        let api = StubMapsApi::new().with_response("details", details_body());
        let params = PlaceDetailsParams {
            place_id: PLACE_ID.to_string(),
        };

        let result = PlaceDetailsTool::execute(params, &api).await;
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["found"], true);
        assert_eq!(structured["place"]["website"], "https://about.google/");
        assert_eq!(structured["place"]["location"]["lat"], 37.4220656);
    }
}
