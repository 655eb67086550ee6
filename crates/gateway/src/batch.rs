use futures::future::join_all;
use log::debug;
use std::sync::Arc;

use crate::{
    location, provider::WeatherProvider, weather::normalize, AppError, EssentialWeather,
    LocationQuery, Units,
};

pub const MAX_BATCH_LOCATIONS: usize = 10;

/// Fans the batch out concurrently and waits for every fetch to settle.
/// Failed entries are dropped, never propagated: an empty result is a valid,
/// non-error outcome even when every location fails. Successes come back in
/// input order.
pub async fn fetch_batch(
    provider: Arc<dyn WeatherProvider>,
    locations: &[LocationQuery],
    units: Units,
) -> Result<Vec<EssentialWeather>, AppError> {
    if locations.is_empty() {
        return Err(AppError::Validation(String::from(
            "Batch request must include at least one location",
        )));
    }
    if locations.len() > MAX_BATCH_LOCATIONS {
        return Err(AppError::Validation(format!(
            "Batch request is limited to {MAX_BATCH_LOCATIONS} locations"
        )));
    }

    let fetches = locations.iter().map(|query| {
        let provider = provider.clone();
        async move {
            let location = location::resolve(query)?;
            let payload = provider.realtime(&location, units).await?;
            Ok::<EssentialWeather, AppError>(
                normalize::realtime(payload, location).sanitized().essential(),
            )
        }
    });

    // Settle all, then project: the per-item outcomes stay available here
    // even though only successes cross the boundary.
    let outcomes = join_all(fetches).await;
    let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
    if failed > 0 {
        debug!("batch fetch dropped {} of {} locations", failed, outcomes.len());
    }

    Ok(outcomes.into_iter().filter_map(Result::ok).collect())
}
