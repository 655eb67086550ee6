use serde::Serialize;
use utoipa::ToSchema;

/// Maps an upstream weather code to its display text. Total over all
/// integers; codes outside the table come back as "Unknown".
pub fn describe(code: i64) -> &'static str {
    match code {
        1000 => "Clear, Sunny",
        1100 => "Mostly Clear",
        1101 => "Partly Cloudy",
        1102 => "Mostly Cloudy",
        1001 => "Cloudy",
        2000 => "Fog",
        2100 => "Light Fog",
        4000 => "Drizzle",
        4001 => "Rain",
        4200 => "Light Rain",
        4201 => "Heavy Rain",
        5000 => "Snow",
        5001 => "Flurries",
        5100 => "Light Snow",
        5101 => "Heavy Snow",
        6000 => "Freezing Drizzle",
        6001 => "Freezing Rain",
        6200 => "Light Freezing Rain",
        6201 => "Heavy Freezing Rain",
        7000 => "Ice Pellets",
        7101 => "Heavy Ice Pellets",
        7102 => "Light Ice Pellets",
        8000 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Storm,
    Fog,
    Unknown,
}

/// Coarse partition of the weather-code space used by lightweight consumers.
pub fn categorize(code: i64) -> Category {
    match code {
        1000 | 1100 => Category::Clear,
        1001 | 1101 | 1102 => Category::Cloudy,
        2000 | 2100 => Category::Fog,
        4000 | 4001 | 4200 | 4201 | 6000 | 6001 | 6200 | 6201 => Category::Rain,
        5000 | 5001 | 5100 | 5101 | 7000 | 7101 | 7102 => Category::Snow,
        8000 => Category::Storm,
        _ => Category::Unknown,
    }
}
