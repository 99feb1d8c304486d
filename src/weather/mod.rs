//! Current-conditions subsystem.
//!
//! Fetches the Open-Meteo "current" snapshot for a coordinate pair,
//! normalizes it into an integer reading, and translates WMO weather
//! codes into display text.

pub mod client;
pub mod conditions;
pub mod types;

pub use client::WeatherClient;
pub use conditions::describe;
pub use types::{WeatherError, WeatherReading};
