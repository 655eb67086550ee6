//! Raw upstream wire types. The mock provider produces the same shapes, so
//! nothing downstream branches on the operating mode.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiLocation {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RealtimeResponse {
    pub data: RealtimeData,
    pub location: ApiLocation,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RealtimeData {
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub values: RealtimeValues,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeValues {
    pub temperature: Option<f64>,
    pub temperature_apparent: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation_intensity: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub pressure_surface_level: Option<f64>,
    pub weather_code: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub timelines: ForecastTimelines,
    pub location: ApiLocation,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ForecastTimelines {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Vec<TimelineEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<TimelineEntry>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub values: TimelineValues,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineValues {
    pub temperature: Option<f64>,
    pub temperature_max: Option<f64>,
    pub temperature_apparent: Option<f64>,
    pub temperature_apparent_max: Option<f64>,
    pub humidity: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub cloud_cover_avg: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub precipitation_probability_max: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_speed_avg: Option<f64>,
    pub uv_index: Option<f64>,
    pub uv_index_max: Option<f64>,
    pub weather_code: Option<i64>,
    pub weather_code_max: Option<i64>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sunrise_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sunset_time: Option<OffsetDateTime>,
}
