use super::codes;
use crate::{
    provider::{ForecastResponse, RealtimeResponse, TimelineEntry},
    ForecastData, ForecastInterval, Location, Timestep, WeatherData,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Provider response is missing the {0} timeline")]
    MissingTimeline(Timestep),
}

/// Fills gaps in the resolved location from what the provider echoed back.
/// The resolver's own values always win.
fn merge_location(mut location: Location, payload: &RealtimeResponse) -> Location {
    location.lat = location.lat.or(payload.location.lat);
    location.lon = location.lon.or(payload.location.lon);
    if location.name.is_none() {
        location.name = payload.location.name.clone();
    }
    location
}

/// Flattens the provider's realtime payload into the normalized snapshot.
/// The description is derived from the weather code here so callers never see
/// a raw code without its text.
pub fn realtime(payload: RealtimeResponse, location: Location) -> WeatherData {
    let location = merge_location(location, &payload);
    let values = &payload.data.values;
    let weather_code = values.weather_code.unwrap_or_default();
    WeatherData {
        location,
        timestamp: payload.data.time,
        temperature: values.temperature.unwrap_or_default(),
        humidity: values.humidity.unwrap_or_default(),
        wind_speed: values.wind_speed.unwrap_or_default(),
        wind_direction: values.wind_direction.unwrap_or_default(),
        precipitation_intensity: values.precipitation_intensity.unwrap_or_default(),
        precipitation_probability: values.precipitation_probability.unwrap_or_default(),
        visibility: values.visibility.unwrap_or_default(),
        uv_index: values.uv_index.unwrap_or_default(),
        cloud_cover: values.cloud_cover.unwrap_or_default(),
        pressure: values.pressure_surface_level.unwrap_or_default(),
        weather_code,
        description: codes::describe(weather_code).to_owned(),
    }
}

fn hourly_interval(entry: &TimelineEntry) -> ForecastInterval {
    let values = &entry.values;
    let weather_code = values.weather_code.unwrap_or_default();
    ForecastInterval {
        time: entry.time,
        temperature: values.temperature.unwrap_or_default(),
        feels_like: values.temperature_apparent.unwrap_or_default(),
        humidity: values.humidity.unwrap_or_default(),
        cloud_cover: values.cloud_cover.unwrap_or_default(),
        precipitation_chance: values.precipitation_probability.unwrap_or_default(),
        wind_speed: values.wind_speed.unwrap_or_default(),
        uv_index: values.uv_index.unwrap_or_default(),
        sunrise: None,
        sunset: None,
        weather_code,
        description: codes::describe(weather_code).to_owned(),
    }
}

fn daily_interval(entry: &TimelineEntry) -> ForecastInterval {
    let values = &entry.values;
    let weather_code = values.weather_code_max.unwrap_or_default();
    ForecastInterval {
        time: entry.time,
        temperature: values.temperature_max.unwrap_or_default(),
        feels_like: values.temperature_apparent_max.unwrap_or_default(),
        humidity: values.humidity_avg.unwrap_or_default(),
        cloud_cover: values.cloud_cover_avg.unwrap_or_default(),
        precipitation_chance: values.precipitation_probability_max.unwrap_or(0.0),
        wind_speed: values.wind_speed_avg.unwrap_or_default(),
        uv_index: values.uv_index_max.unwrap_or_default(),
        sunrise: values.sunrise_time,
        sunset: values.sunset_time,
        weather_code,
        description: codes::describe(weather_code).to_owned(),
    }
}

/// Normalizes a forecast payload for the requested timestep. Interval order
/// is whatever the provider sent, untouched.
pub fn forecast(
    payload: ForecastResponse,
    location: Location,
    timestep: Timestep,
) -> Result<ForecastData, Error> {
    let intervals = match timestep {
        Timestep::Hourly => payload
            .timelines
            .hourly
            .as_deref()
            .ok_or(Error::MissingTimeline(timestep))?
            .iter()
            .map(hourly_interval)
            .collect(),
        Timestep::Daily => payload
            .timelines
            .daily
            .as_deref()
            .ok_or(Error::MissingTimeline(timestep))?
            .iter()
            .map(daily_interval)
            .collect(),
    };

    Ok(ForecastData {
        location,
        timestep,
        intervals,
    })
}
