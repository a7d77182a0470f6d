//! Maps domain module.
//!
//! Everything the tools need to know about the mapping provider:
//!
//! - `model.rs` - Locations, travel modes and typed upstream requests
//! - `payload.rs` - Typed provider responses and status classification
//! - `client.rs` - The `MapsApi` seam and the `reqwest` implementation
//! - `error.rs` - Upstream error types

mod client;
mod error;
pub mod model;
pub mod payload;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{DEFAULT_BASE_URL, GoogleMapsClient, MapsApi};
pub use error::MapsError;
pub use model::{InputType, LatLng, LocationInput, TravelMode};
