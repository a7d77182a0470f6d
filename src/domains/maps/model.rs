//! Request-side types shared by the maps client and the tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLng {
    /// Latitude, -90 to 90.
    #[schemars(description = "Latitude in decimal degrees (-90 to 90)")]
    pub lat: f64,

    /// Longitude, -180 to 180.
    #[schemars(description = "Longitude in decimal degrees (-180 to 180)")]
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside their ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Format as the provider's `lat,lng` parameter.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A location given either as a free-form address or as coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LocationInput {
    /// Address, place name or landmark, e.g. "Eiffel Tower, Paris".
    Address(String),
    /// Coordinates, e.g. {"lat": 48.858, "lng": 2.294}.
    Coordinates(LatLng),
}

impl LocationInput {
    /// Format as a provider location parameter.
    pub fn to_param(&self) -> String {
        match self {
            Self::Address(address) => address.trim().to_string(),
            Self::Coordinates(coords) => coords.to_param(),
        }
    }
}

impl fmt::Display for LocationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

/// Travel mode for routing and distance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the Find Place query text should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum InputType {
    /// Name, address or category of a place.
    #[default]
    Textquery,
    /// Phone number in international format, e.g. "+14155552671".
    Phonenumber,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Textquery => "textquery",
            Self::Phonenumber => "phonenumber",
        }
    }
}

/// Proximity bias for Find Place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationBias {
    Point(LatLng),
    Circle { center: LatLng, radius_meters: u32 },
}

impl LocationBias {
    /// Format as the provider's `locationbias` parameter.
    pub fn to_param(&self) -> String {
        match self {
            Self::Point(center) => format!("point:{}", center.to_param()),
            Self::Circle {
                center,
                radius_meters,
            } => format!("circle:{}@{}", radius_meters, center.to_param()),
        }
    }
}

// ============================================================================
// Upstream requests
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
}

/// One request covering the whole origins x destinations matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrixRequest {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub mode: TravelMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindPlaceRequest {
    pub input: String,
    pub input_type: InputType,
    pub location_bias: Option<LocationBias>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchRequest {
    pub location: LatLng,
    pub radius_meters: u32,
    pub keyword: Option<String>,
    pub place_type: Option<String>,
}
