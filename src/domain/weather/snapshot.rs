//! Last-known-good weather snapshot

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when a provider payload does not match the expected shape
#[derive(Debug, Clone, Error)]
#[error("Malformed provider payload: {reason}")]
pub struct MalformedPayload {
    pub reason: String,
}

/// The last successfully parsed provider response.
///
/// Replaced wholesale on each successful fetch; a payload missing any field
/// fails parsing instead of producing a partial merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub city_id: i64,
    /// Provider-side observation time, epoch seconds UTC
    pub observed_at: i64,
    /// Offset of the location's local time from UTC, seconds
    pub timezone_offset: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temperature: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub cloud_coverage: u8,
    pub weather_id: i64,
    pub weather_main: String,
    pub icon: String,
    pub latitude: f64,
    pub longitude: f64,
}

// Wire shape of the provider's current-weather document. Every field is
// required; serde rejects payloads that omit any of them.
#[derive(Debug, Deserialize)]
struct ProviderPayload {
    name: String,
    id: i64,
    timezone: i64,
    dt: i64,
    sys: PayloadSys,
    main: PayloadMain,
    wind: PayloadWind,
    weather: Vec<PayloadCondition>,
    clouds: PayloadClouds,
    coord: PayloadCoord,
}

#[derive(Debug, Deserialize)]
struct PayloadSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct PayloadMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct PayloadWind {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct PayloadCondition {
    id: i64,
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct PayloadClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct PayloadCoord {
    lat: f64,
    lon: f64,
}

impl WeatherSnapshot {
    /// Parse a raw provider response body into a snapshot.
    pub fn from_provider_json(body: &str) -> Result<Self, MalformedPayload> {
        let payload: ProviderPayload =
            serde_json::from_str(body).map_err(|e| MalformedPayload {
                reason: e.to_string(),
            })?;

        let primary = payload.weather.first().ok_or_else(|| MalformedPayload {
            reason: "empty weather condition list".to_string(),
        })?;

        Ok(Self {
            city: payload.name,
            city_id: payload.id,
            observed_at: payload.dt,
            timezone_offset: payload.timezone,
            sunrise: payload.sys.sunrise,
            sunset: payload.sys.sunset,
            temperature: payload.main.temp,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            wind_speed: payload.wind.speed,
            wind_direction: payload.wind.deg,
            cloud_coverage: payload.clouds.all,
            weather_id: primary.id,
            weather_main: primary.main.clone(),
            icon: primary.icon.clone(),
            latitude: payload.coord.lat,
            longitude: payload.coord.lon,
        })
    }
}
