//! Weather provider port interface

use async_trait::async_trait;
use thiserror::Error;

/// Fetch failures, classified for status reporting
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// DNS or connection failure reaching the provider
    #[error("Cant reach {0}")]
    Unreachable(String),

    /// Provider answered with a non-success HTTP status
    #[error("{code} {reason}")]
    BadStatus { code: u16, reason: String },

    /// Response body did not match the expected shape
    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),

    /// Fetch did not complete within the cycle's time budget
    #[error("Weather request timed out after {0} seconds")]
    TimedOut(u64),

    /// Any other transport-level failure
    #[error("Weather request failed: {0}")]
    RequestFailed(String),
}

/// Raw outcome of one provider fetch: HTTP status, its reason phrase, and
/// the unparsed body text. Validation and parsing happen in the engine.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl FetchOutcome {
    /// Whether the provider reported success for this response.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Port for the external weather provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current weather document for a city id.
    ///
    /// Returns the raw response even for non-success statuses; only
    /// transport-level failures surface as `FetchError`.
    async fn fetch_current(&self, city_id: &str, api_token: &str)
        -> Result<FetchOutcome, FetchError>;
}
