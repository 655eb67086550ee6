use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::Location;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Timestep {
    #[default]
    #[serde(rename = "1h")]
    Hourly,
    #[serde(rename = "1d")]
    Daily,
}

impl Timestep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timestep::Hourly => "1h",
            Timestep::Daily => "1d",
        }
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Full,
    Compact,
}

/// Normalized realtime snapshot. Numeric fields are raw provider values until
/// [`WeatherData::sanitized`] applies the output rounding rules.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: Location,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation_intensity: f64,
    pub precipitation_probability: f64,
    pub visibility: f64,
    pub uv_index: f64,
    pub cloud_cover: f64,
    pub pressure: f64,
    pub weather_code: i64,
    pub description: String,
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

impl WeatherData {
    /// Applies the fixed output precision. Idempotent: sanitizing twice
    /// produces identical numeric fields.
    pub fn sanitized(mut self) -> Self {
        self.temperature = round_to(self.temperature, 1);
        self.humidity = round_to(self.humidity, 1);
        self.wind_speed = round_to(self.wind_speed, 1);
        self.wind_direction = round_to(self.wind_direction, 0);
        self.precipitation_intensity = round_to(self.precipitation_intensity, 2);
        self.precipitation_probability = round_to(self.precipitation_probability, 0);
        self.visibility = round_to(self.visibility, 1);
        self.uv_index = round_to(self.uv_index, 1);
        self.cloud_cover = round_to(self.cloud_cover, 0);
        self.pressure = round_to(self.pressure, 1);
        self
    }

    pub fn compact(&self) -> CompactWeatherData {
        CompactWeatherData {
            location: self.location.label(),
            temperature: self.temperature,
            condition: self.description.clone(),
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            timestamp: self.timestamp,
        }
    }

    pub fn essential(&self) -> EssentialWeather {
        EssentialWeather {
            location: self.location.clone(),
            temperature: self.temperature,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            precipitation_intensity: self.precipitation_intensity,
            condition: self.description.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Reduced projection returned for `format=compact`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompactWeatherData {
    pub location: String,
    pub temperature: f64,
    pub condition: String,
    pub humidity: f64,
    pub wind_speed: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Per-location projection returned by the batch endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EssentialWeather {
    pub location: Location,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation_intensity: f64,
    pub condition: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Normalized forecast: intervals stay in the upstream chronological order.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastData {
    pub location: Location,
    pub timestep: Timestep,
    pub intervals: Vec<ForecastInterval>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastInterval {
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub cloud_cover: f64,
    pub precipitation_chance: f64,
    pub wind_speed: f64,
    pub uv_index: f64,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sunrise: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sunset: Option<OffsetDateTime>,
    pub weather_code: i64,
    pub description: String,
}
