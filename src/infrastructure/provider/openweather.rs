//! OpenWeather provider adapter

use async_trait::async_trait;
use reqwest::Url;

use crate::application::ports::{FetchError, FetchOutcome, WeatherProvider};

/// OpenWeather current-weather API base URL
const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Host used in the fixed unreachable-provider message when the base URL
/// cannot be parsed
const DEFAULT_HOST: &str = "api.openweathermap.org";

/// Current-weather client for the OpenWeather API.
///
/// Returns the raw status and body; response validation and parsing belong
/// to the engine.
pub struct OpenWeatherClient {
    base_url: String,
    host: String,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    /// Create a client against the production OpenWeather endpoint
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against a custom base URL (used in tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let host = Url::parse(&base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Self {
            base_url,
            host,
            client: reqwest::Client::new(),
        }
    }

    /// Build the request URL for a city id
    fn request_url(&self, city_id: &str, api_token: &str) -> String {
        format!(
            "{}/weather?id={}&units=metric&appid={}",
            self.base_url, city_id, api_token
        )
    }
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(
        &self,
        city_id: &str,
        api_token: &str,
    ) -> Result<FetchOutcome, FetchError> {
        let url = self.request_url(city_id, api_token);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                FetchError::Unreachable(self.host.clone())
            } else {
                FetchError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        Ok(FetchOutcome {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}
