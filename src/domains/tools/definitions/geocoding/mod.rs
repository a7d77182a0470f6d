//! Geocoding tools.

pub mod geocode;

pub use geocode::{GetGeocodeParams, GetGeocodeTool};
