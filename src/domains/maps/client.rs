//! Google Maps Web Service client.
//!
//! [`MapsApi`] is the seam between the tools and the provider: the server
//! builds one [`GoogleMapsClient`] at startup and hands it to every tool
//! route as `Arc<dyn MapsApi>`. Tests substitute their own implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::error::MapsError;
use super::model::{DirectionsRequest, DistanceMatrixRequest, FindPlaceRequest, NearbySearchRequest};
use super::payload::{
    DirectionsResponse, DistanceMatrixResponse, FindPlaceResponse, GeocodeResponse,
    NearbySearchResponse, PlaceDetailsResponse,
};
use crate::core::config::{Config, MapsConfig};
use crate::core::Error;

/// Default base URL of the Google Maps Web Services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Fields requested from Find Place.
const FIND_PLACE_FIELDS: &str = "place_id,name,formatted_address,geometry,types,rating,user_ratings_total";

/// Fields requested from Place Details.
const PLACE_DETAILS_FIELDS: &str = "place_id,name,formatted_address,geometry,types,rating,\
     user_ratings_total,formatted_phone_number,international_phone_number,website,opening_hours";

/// Calls the tools need from the mapping provider.
///
/// Each method performs exactly one request and returns the decoded payload.
/// Status codes inside the payload are left for the caller to interpret.
#[async_trait]
pub trait MapsApi: Send + Sync {
    /// Route between two locations.
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError>;

    /// Distances and durations for every origin/destination pair.
    async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse, MapsError>;

    /// Forward geocoding of a free-form address.
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, MapsError>;

    /// Text or phone number place search.
    async fn find_place(&self, request: &FindPlaceRequest) -> Result<FindPlaceResponse, MapsError>;

    /// Places around a point.
    async fn places_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, MapsError>;

    /// Full record of one place.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse, MapsError>;
}

/// [`MapsApi`] implementation over HTTPS with `reqwest`.
pub struct GoogleMapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    language: Option<String>,
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("language", &self.language)
            .finish()
    }
}

impl GoogleMapsClient {
    /// Create a client for the given key and provider settings.
    pub fn new(api_key: Option<String>, maps: &MapsConfig) -> crate::core::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: maps.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            language: maps.language.clone(),
        })
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &Config) -> crate::core::Result<Self> {
        Self::new(config.credentials.google_maps_api_key.clone(), &config.maps)
    }

    /// Build the full request URL for an endpoint.
    ///
    /// The key and the configured language are appended to `params`.
    fn endpoint_url(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<String, MapsError> {
        let key = self.api_key.as_ref().ok_or(MapsError::MissingApiKey)?;

        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        params.push(("key", key.clone()));

        let query = serde_urlencoded::to_string(&params)
            .map_err(|e| MapsError::request(format!("Failed to encode query: {e}")))?;

        Ok(format!("{}/{}/json?{}", self.base_url, endpoint, query))
    }

    /// Send one GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, MapsError> {
        let url = self.endpoint_url(endpoint, params)?;

        // The URL carries the key, so only the endpoint is logged.
        debug!("GET {}/{}", self.base_url, endpoint);

        let response = self.http.get(url).send().await.map_err(|e| {
            let e = MapsError::from(e);
            error!("Request to {} failed: {}", endpoint, e);
            e
        })?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            error!("{} answered HTTP {}", endpoint, status);
            return Err(MapsError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            let e = MapsError::from(e);
            error!("Reading {} response failed: {}", endpoint, e);
            e
        })?;

        debug!("{} response received: {} bytes", endpoint, body.len());

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MapsApi for GoogleMapsClient {
    #[instrument(skip(self), fields(mode = %request.mode))]
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError> {
        self.get_json(
            "directions",
            vec![
                ("origin", request.origin.clone()),
                ("destination", request.destination.clone()),
                ("mode", request.mode.as_str().to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self), fields(
        origins = request.origins.len(),
        destinations = request.destinations.len(),
        mode = %request.mode
    ))]
    async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse, MapsError> {
        self.get_json(
            "distancematrix",
            vec![
                ("origins", request.origins.join("|")),
                ("destinations", request.destinations.join("|")),
                ("mode", request.mode.as_str().to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, MapsError> {
        self.get_json("geocode", vec![("address", address.to_string())])
            .await
    }

    #[instrument(skip(self))]
    async fn find_place(&self, request: &FindPlaceRequest) -> Result<FindPlaceResponse, MapsError> {
        let mut params = vec![
            ("input", request.input.clone()),
            ("inputtype", request.input_type.as_str().to_string()),
            ("fields", FIND_PLACE_FIELDS.to_string()),
        ];
        if let Some(bias) = &request.location_bias {
            params.push(("locationbias", bias.to_param()));
        }

        self.get_json("place/findplacefromtext", params).await
    }

    #[instrument(skip(self))]
    async fn places_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, MapsError> {
        let mut params = vec![
            ("location", request.location.to_param()),
            ("radius", request.radius_meters.to_string()),
        ];
        if let Some(keyword) = &request.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(place_type) = &request.place_type {
            params.push(("type", place_type.clone()));
        }

        self.get_json("place/nearbysearch", params).await
    }

    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse, MapsError> {
        self.get_json(
            "place/details",
            vec![
                ("place_id", place_id.to_string()),
                ("fields", PLACE_DETAILS_FIELDS.to_string()),
            ],
        )
        .await
    }
}
