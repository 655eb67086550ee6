mod mock;
mod payload;
mod tomorrow;

pub use mock::MockProvider;
pub use payload::*;
pub use tomorrow::TomorrowClient;

use crate::{Location, Timestep, Units};
use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid weather provider API key")]
    Unauthorized,
    #[error("Weather provider denied access")]
    Forbidden,
    #[error("Location not found")]
    LocationNotFound,
    #[error("Weather provider rate limit exceeded")]
    RateLimited,
    #[error("Weather provider server error (status {0})")]
    UpstreamServer(u16),
    #[error("Failed to fetch weather data (status {0})")]
    Unexpected(u16),
    #[error("Failed to reach weather provider: {0}")]
    Request(#[from] reqwest::Error),
}

/// Upstream weather source. The live client and the mock implement the same
/// contract so the pipeline never branches on the operating mode.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn realtime(&self, location: &Location, units: Units) -> Result<RealtimeResponse, Error>;

    async fn forecast(
        &self,
        location: &Location,
        units: Units,
        timestep: Timestep,
    ) -> Result<ForecastResponse, Error>;

    /// Free-text location search, delegated to the provider's own resolution.
    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<Location>, Error>;

    /// Lightweight probe; true means the upstream is reachable and answering.
    async fn check_health(&self) -> bool;
}
