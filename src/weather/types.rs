//! Core types for the weather subsystem.

use crate::settings::Unit;
use crate::weather::conditions;
use serde::Deserialize;
use std::fmt;

/// One normalized "current conditions" snapshot.
///
/// Temperature and wind speed are rounded to the nearest integer with
/// `f64::round`, i.e. half-away-from-zero; wind speed is always mph.
/// Rebuilt on every poll, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherReading {
    pub temperature: i32,
    pub wind_speed: i32,
    pub code: i32,
}

impl WeatherReading {
    /// The widget's weather line, e.g. `68°F • Clear • Wind 6 mph`.
    pub fn display_text(&self, unit: Unit) -> String {
        format!(
            "{}{} • {} • Wind {} mph",
            self.temperature,
            unit.symbol(),
            conditions::describe(self.code),
            self.wind_speed
        )
    }
}

/// Response shape of the forecast endpoint; only the `current` block is
/// requested or read.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentBlock {
    pub temperature_2m: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
}

/// Weather fetch errors. The three variants stay distinguishable so the
/// render boundary can log precise diagnostics while showing one uniform
/// fallback string.
#[derive(Debug)]
pub enum WeatherError {
    /// The server answered with a non-success status.
    Http(u16),
    /// The request never produced a readable response.
    Network(String),
    /// The response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "Weather service returned HTTP {}", status),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Parse(msg) => write!(f, "Invalid weather response: {}", msg),
        }
    }
}

impl std::error::Error for WeatherError {}
