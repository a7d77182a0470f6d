//! Upstream (mapping provider) error types.

use thiserror::Error;

/// Errors raised while talking to the mapping provider.
///
/// Every variant is an upstream failure from the caller's point of view.
/// "No results" is never represented here: the provider's `ZERO_RESULTS`
/// and `NOT_FOUND` statuses are successful, empty lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapsError {
    /// No API key is configured, so no request can be signed.
    #[error("Google Maps API key is not configured. Set GOOGLE_MAPS_API_KEY")]
    MissingApiKey,

    /// The HTTP request could not be completed (connect, timeout, TLS...).
    #[error("Request to the maps service failed: {0}")]
    Request(String),

    /// The provider throttled the request at the HTTP level.
    #[error("Maps service rate limit exceeded")]
    RateLimited,

    /// The provider answered with a non-success HTTP status.
    #[error("Maps service returned HTTP {0}")]
    HttpStatus(u16),

    /// The response body could not be decoded.
    #[error("Invalid response from the maps service: {0}")]
    InvalidResponse(String),

    /// `REQUEST_DENIED`: invalid key, disabled API or billing problem.
    #[error("Request denied by the maps service: {0}")]
    Denied(String),

    /// `OVER_QUERY_LIMIT` / `OVER_DAILY_LIMIT`.
    #[error("Maps service quota exceeded: {0}")]
    QuotaExceeded(String),

    /// `INVALID_REQUEST` and the `MAX_*_EXCEEDED` family.
    #[error("Maps service rejected the request: {0}")]
    InvalidRequest(String),

    /// `UNKNOWN_ERROR` or a status this crate does not know about.
    #[error("Maps service error ({status}): {message}")]
    Service { status: String, message: String },
}

impl MapsError {
    /// Create a new request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create a new invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a new service error.
    pub fn service(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            status: status.into(),
            message: message.into(),
        }
    }
}

/// reqwest errors display the request URL, which carries the API key, so
/// the URL is stripped before the message is kept.
impl From<reqwest::Error> for MapsError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            Self::request("request timed out")
        } else if e.is_connect() {
            Self::request("connection failed")
        } else if e.is_decode() {
            Self::invalid_response(e.to_string())
        } else {
            Self::request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for MapsError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_response(format!("JSON parse error: {e}"))
    }
}
