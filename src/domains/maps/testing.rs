//! Recording stand-in for the mapping provider, used by unit tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

use super::client::MapsApi;
use super::error::MapsError;
use super::model::{DirectionsRequest, DistanceMatrixRequest, FindPlaceRequest, NearbySearchRequest};
use super::payload::{
    DirectionsResponse, DistanceMatrixResponse, FindPlaceResponse, GeocodeResponse,
    NearbySearchResponse, PlaceDetailsResponse,
};

/// A call received by [`StubMapsApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Directions(DirectionsRequest),
    DistanceMatrix(DistanceMatrixRequest),
    Geocode(String),
    FindPlace(FindPlaceRequest),
    PlacesNearby(NearbySearchRequest),
    PlaceDetails(String),
}

/// Serves canned provider JSON and records every call.
///
/// Responses are keyed by endpoint (`directions`, `distancematrix`,
/// `geocode`, `findplace`, `nearbysearch`, `details`). A more specific key
/// wins when present: `directions:<mode>`, `geocode:<address>` and
/// `details:<place_id>`. Endpoints without a response answer `ZERO_RESULTS`.
#[derive(Default)]
pub struct StubMapsApi {
    responses: HashMap<String, serde_json::Value>,
    failure: Option<MapsError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubMapsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for requests matching `key`.
    pub fn with_response(mut self, key: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses.insert(key.into(), body);
        self
    }

    /// Fail every call with `error`.
    pub fn failing(mut self, error: MapsError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn respond<T: DeserializeOwned>(&self, keys: &[String]) -> Result<T, MapsError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let body = keys
            .iter()
            .find_map(|k| self.responses.get(k))
            .cloned()
            .unwrap_or_else(|| serde_json::json!({ "status": "ZERO_RESULTS" }));

        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl MapsApi for StubMapsApi {
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError> {
        self.record(RecordedCall::Directions(request.clone()));
        self.respond(&[
            format!("directions:{}", request.mode),
            "directions".to_string(),
        ])
    }

    async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse, MapsError> {
        self.record(RecordedCall::DistanceMatrix(request.clone()));
        self.respond(&["distancematrix".to_string()])
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, MapsError> {
        self.record(RecordedCall::Geocode(address.to_string()));
        self.respond(&[format!("geocode:{address}"), "geocode".to_string()])
    }

    async fn find_place(&self, request: &FindPlaceRequest) -> Result<FindPlaceResponse, MapsError> {
        self.record(RecordedCall::FindPlace(request.clone()));
        self.respond(&["findplace".to_string()])
    }

    async fn places_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, MapsError> {
        self.record(RecordedCall::PlacesNearby(request.clone()));
        self.respond(&["nearbysearch".to_string()])
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse, MapsError> {
        self.record(RecordedCall::PlaceDetails(place_id.to_string()));
        self.respond(&[format!("details:{place_id}"), "details".to_string()])
    }
}
