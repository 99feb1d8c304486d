//! Open-Meteo forecast client.

use crate::settings::Unit;
use crate::weather::types::{ForecastResponse, WeatherError, WeatherReading};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";
const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "cityglance/0.3 (terminal-weather-widget)";

/// Async client for the current-conditions endpoint.
///
/// One logical request per call and no internal retries: a failed poll is
/// covered by the next scheduled one.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// Client against the public API host.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a specific host (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for a coordinate pair.
    ///
    /// The zone name rides along so the service resolves "current"
    /// against the right local day; the unit picks the temperature
    /// scale. Wind speed is always requested in mph.
    pub async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        time_zone: &str,
        unit: Unit,
    ) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("temperature_unit", unit.as_str().to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("timezone", time_zone.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;
        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        // f64::round is half-away-from-zero; displayed values are always
        // whole numbers.
        Ok(WeatherReading {
            temperature: parsed.current.temperature_2m.round() as i32,
            wind_speed: parsed.current.wind_speed_10m.round() as i32,
            code: parsed.current.weather_code,
        })
    }
}
