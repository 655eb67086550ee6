use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{Error, ForecastResponse, RealtimeResponse, WeatherProvider};
use crate::{Location, Timestep, Units};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Live upstream client. One reqwest client is built at startup and reused
/// for every request; a single failed call surfaces as a failed operation,
/// there are no retries.
pub struct TomorrowClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TomorrowClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!("requesting upstream: {} {:?}", url, query);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }
        Ok(response.json::<T>().await?)
    }
}

fn map_status(status: StatusCode) -> Error {
    match status.as_u16() {
        401 => Error::Unauthorized,
        403 => Error::Forbidden,
        404 => Error::LocationNotFound,
        429 => Error::RateLimited,
        code if (500..600).contains(&code) => Error::UpstreamServer(code),
        code => Error::Unexpected(code),
    }
}

#[async_trait]
impl WeatherProvider for TomorrowClient {
    async fn realtime(&self, location: &Location, units: Units) -> Result<RealtimeResponse, Error> {
        self.get_json(
            "weather/realtime",
            &[
                ("location", location.query_param()),
                ("units", units.as_str().to_owned()),
            ],
        )
        .await
    }

    async fn forecast(
        &self,
        location: &Location,
        units: Units,
        timestep: Timestep,
    ) -> Result<ForecastResponse, Error> {
        self.get_json(
            "weather/forecast",
            &[
                ("location", location.query_param()),
                ("units", units.as_str().to_owned()),
                ("timesteps", timestep.as_str().to_owned()),
            ],
        )
        .await
    }

    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<Location>, Error> {
        // The upstream owns geocoding: resolve the free text through a
        // realtime call and hand back the location it echoes.
        let probe = Location {
            name: Some(query.to_owned()),
            ..Default::default()
        };
        let response = self.realtime(&probe, Units::Metric).await?;
        let resolved = Location {
            lat: response.location.lat,
            lon: response.location.lon,
            name: response.location.name.or_else(|| Some(query.to_owned())),
            country: None,
        };
        Ok(vec![resolved].into_iter().take(limit).collect())
    }

    async fn check_health(&self) -> bool {
        let origin = Location {
            lat: Some(0.0),
            lon: Some(0.0),
            ..Default::default()
        };
        self.realtime(&origin, Units::Metric).await.is_ok()
    }
}
