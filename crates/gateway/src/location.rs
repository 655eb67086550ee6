use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw location input accepted by the weather endpoints. Either a coordinate
/// pair or a free-text city name must be present; lat and lon only count as a
/// pair.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
}

/// Canonical location passed to the upstream client and echoed in responses.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Location {
    /// Human-readable label used by the compact projection.
    pub fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
            _ => String::from("unknown location"),
        }
    }

    /// Value of the upstream `location` parameter: "lat,lon" when coordinates
    /// are known, the raw city text otherwise.
    pub fn query_param(&self) -> String {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => format!("{lat},{lon}"),
            _ => self.name.clone().unwrap_or_default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
    #[error("Latitude and longitude must be provided together")]
    HalfCoordinatePair,
    #[error("City name must be at least 2 characters")]
    CityTooShort,
    #[error("Location must include coordinates or city name")]
    MissingLocation,
}

/// Resolves a raw query into a canonical [`Location`]. Pure function, no I/O;
/// city-only queries keep coordinates unset and defer resolution to the
/// upstream provider.
pub fn resolve(query: &LocationQuery) -> Result<Location, Error> {
    match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(Error::LatitudeOutOfRange(lat));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(Error::LongitudeOutOfRange(lon));
            }
            let name = match query.city.as_deref().map(str::trim) {
                Some(city) if !city.is_empty() => city.to_owned(),
                _ => format!("{lat:.4}, {lon:.4}"),
            };
            Ok(Location {
                lat: Some(lat),
                lon: Some(lon),
                name: Some(name),
                country: None,
            })
        }
        (None, None) => {
            let city = query.city.as_deref().map(str::trim).unwrap_or_default();
            if city.is_empty() {
                return Err(Error::MissingLocation);
            }
            if city.chars().count() < 2 {
                return Err(Error::CityTooShort);
            }
            Ok(Location {
                lat: None,
                lon: None,
                name: Some(city.to_owned()),
                country: None,
            })
        }
        _ => Err(Error::HalfCoordinatePair),
    }
}
