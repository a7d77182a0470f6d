//! Tool definitions module.
//!
//! One file per tool, grouped by area. Shared argument validation and
//! result conversion live in `common.rs`.

pub mod common;
pub mod geocoding;
pub mod places;
pub mod routes;

pub use geocoding::{GetGeocodeParams, GetGeocodeTool};
pub use places::{
    FindPlaceParams, FindPlaceTool, PlaceDetailsParams, PlaceDetailsTool, PlaceNearbyParams,
    PlaceNearbyTool, PlaceSummary,
};
pub use routes::{GetDirectionsParams, GetDirectionsTool, GetDistanceParams, GetDistanceTool};
