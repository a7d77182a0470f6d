//! Typed response payloads of the Google Maps Web Service endpoints.
//!
//! Only the fields the tools read are modelled; everything else the provider
//! sends is ignored during deserialization. Fields that the provider may omit
//! are `Option` or `#[serde(default)]`.

use serde::Deserialize;

use super::error::MapsError;
use super::model::LatLng;

/// The `status` field carried by every response (and by matrix elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    NotFound,
    InvalidRequest,
    MaxElementsExceeded,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    OverQueryLimit,
    OverDailyLimit,
    RequestDenied,
    UnknownError,
    #[serde(other)]
    Unrecognized,
}

/// Whether a successful lookup produced data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    Empty,
}

impl ApiStatus {
    /// Classify a response status.
    ///
    /// `ZERO_RESULTS` and `NOT_FOUND` are successful empty lookups; every
    /// other non-`OK` status is an upstream error.
    pub fn classify(self, error_message: Option<&str>) -> Result<Lookup, MapsError> {
        let message = error_message.unwrap_or("no details provided").to_string();
        match self {
            Self::Ok => Ok(Lookup::Found),
            Self::ZeroResults | Self::NotFound => Ok(Lookup::Empty),
            Self::InvalidRequest
            | Self::MaxElementsExceeded
            | Self::MaxWaypointsExceeded
            | Self::MaxRouteLengthExceeded => Err(MapsError::InvalidRequest(format!(
                "{}: {}",
                self.as_str(),
                message
            ))),
            Self::OverQueryLimit | Self::OverDailyLimit => Err(MapsError::QuotaExceeded(message)),
            Self::RequestDenied => Err(MapsError::Denied(message)),
            Self::UnknownError | Self::Unrecognized => {
                Err(MapsError::service(self.as_str(), message))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::MaxElementsExceeded => "MAX_ELEMENTS_EXCEEDED",
            Self::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            Self::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::OverDailyLimit => "OVER_DAILY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

/// A `{ "text": "5.2 km", "value": 5213 }` pair (meters or seconds).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

// ============================================================================
// Directions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub html_instructions: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    #[serde(default)]
    pub travel_mode: Option<String>,
}

// ============================================================================
// Distance Matrix
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElement {
    pub status: ApiStatus,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

// ============================================================================
// Geocoding
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeEntry {
    #[serde(default)]
    pub formatted_address: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub types: Vec<String>,
}

// ============================================================================
// Places
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct FindPlaceResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub candidates: Vec<PlaceRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceRecord>,
}

/// A place as returned by Find Place, Nearby Search and Place Details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceRecord {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    /// Short address used by Nearby Search instead of `formatted_address`.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}
