use async_trait::async_trait;
use rand::Rng;
use std::f64::consts::TAU;
use time::{Duration, OffsetDateTime, Time};

use super::{
    ApiLocation, Error, ForecastResponse, ForecastTimelines, RealtimeData, RealtimeResponse,
    RealtimeValues, TimelineEntry, TimelineValues, WeatherProvider,
};
use crate::{Location, Timestep, Units};

const BASELINE_TEMPERATURE_C: f64 = 20.0;
const RAIN_CHANCE: f64 = 0.08;
const HOURLY_INTERVALS: usize = 24;
const DAILY_INTERVALS: usize = 7;

/// Synthetic provider used for local development and tests. Output is
/// structurally identical to the live provider's schema, with values
/// fluctuating around a fixed baseline; no network access happens here.
pub struct MockProvider {
    base_temperature: f64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            base_temperature: BASELINE_TEMPERATURE_C,
        }
    }

    pub fn with_base_temperature(base_temperature: f64) -> Self {
        Self { base_temperature }
    }

    fn echo_location(location: &Location) -> ApiLocation {
        ApiLocation {
            lat: location.lat.or(Some(51.5072)),
            lon: location.lon.or(Some(-0.1276)),
            name: location.name.clone(),
            kind: None,
        }
    }

    fn pick_weather_code(rng: &mut impl Rng) -> i64 {
        if rng.gen_bool(RAIN_CHANCE) {
            4200
        } else {
            [1000, 1100, 1101][rng.gen_range(0..3)]
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn temperature_out(celsius: f64, units: Units) -> f64 {
    match units {
        Units::Metric => celsius,
        Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
    }
}

fn speed_out(meters_per_second: f64, units: Units) -> f64 {
    match units {
        Units::Metric => meters_per_second,
        Units::Imperial => meters_per_second * 2.23694,
    }
}

fn distance_out(kilometers: f64, units: Units) -> f64 {
    match units {
        Units::Metric => kilometers,
        Units::Imperial => kilometers * 0.621371,
    }
}

fn precipitation_out(millimeters: f64, units: Units) -> f64 {
    match units {
        Units::Metric => millimeters,
        Units::Imperial => millimeters * 0.0393701,
    }
}

fn pressure_out(hectopascals: f64, units: Units) -> f64 {
    match units {
        Units::Metric => hectopascals,
        Units::Imperial => hectopascals * 0.02953,
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn realtime(&self, location: &Location, units: Units) -> Result<RealtimeResponse, Error> {
        let mut rng = rand::thread_rng();
        let weather_code = Self::pick_weather_code(&mut rng);
        let raining = weather_code == 4200;
        let temperature = self.base_temperature + rng.gen_range(-1.0..=1.0);

        let values = RealtimeValues {
            temperature: Some(temperature_out(temperature, units)),
            temperature_apparent: Some(temperature_out(temperature - 0.5, units)),
            humidity: Some(rng.gen_range(40.0..=75.0)),
            wind_speed: Some(speed_out(rng.gen_range(1.0..=8.0), units)),
            wind_direction: Some(rng.gen_range(0.0..360.0)),
            precipitation_intensity: Some(precipitation_out(
                if raining { rng.gen_range(0.1..=1.5) } else { 0.0 },
                units,
            )),
            precipitation_probability: Some(if raining {
                rng.gen_range(40.0..=90.0)
            } else {
                rng.gen_range(0.0..=15.0)
            }),
            visibility: Some(distance_out(rng.gen_range(8.0..=16.0), units)),
            uv_index: Some(rng.gen_range(0.0..=8.0_f64).round()),
            cloud_cover: Some(rng.gen_range(0.0..=100.0_f64).round()),
            pressure_surface_level: Some(pressure_out(
                1013.25 + rng.gen_range(-8.0..=8.0),
                units,
            )),
            weather_code: Some(weather_code),
        };

        Ok(RealtimeResponse {
            data: RealtimeData {
                time: OffsetDateTime::now_utc(),
                values,
            },
            location: Self::echo_location(location),
        })
    }

    async fn forecast(
        &self,
        location: &Location,
        units: Units,
        timestep: Timestep,
    ) -> Result<ForecastResponse, Error> {
        let mut rng = rand::thread_rng();
        let now = OffsetDateTime::now_utc();

        let timelines = match timestep {
            Timestep::Hourly => {
                let entries = (0..HOURLY_INTERVALS)
                    .map(|i| {
                        let phase = i as f64 / HOURLY_INTERVALS as f64 * TAU;
                        let weather_code = Self::pick_weather_code(&mut rng);
                        TimelineEntry {
                            time: now + Duration::hours(i as i64 + 1),
                            values: TimelineValues {
                                temperature: Some(temperature_out(
                                    self.base_temperature + rng.gen_range(-1.0..=1.0),
                                    units,
                                )),
                                temperature_apparent: Some(temperature_out(
                                    self.base_temperature - 0.5 + rng.gen_range(-1.0..=1.0),
                                    units,
                                )),
                                humidity: Some(
                                    (55.0 + 15.0 * phase.sin() + rng.gen_range(-5.0..=5.0))
                                        .clamp(0.0, 100.0),
                                ),
                                cloud_cover: Some(
                                    (50.0 + 40.0 * (phase * 0.7).sin() + rng.gen_range(-10.0..=10.0))
                                        .clamp(0.0, 100.0),
                                ),
                                precipitation_probability: Some(if weather_code == 4200 {
                                    rng.gen_range(40.0..=90.0)
                                } else {
                                    rng.gen_range(0.0..=15.0)
                                }),
                                wind_speed: Some(speed_out(
                                    (3.0 + 2.0 * (phase + 1.3).sin() + rng.gen_range(0.0..=1.5))
                                        .max(0.0),
                                    units,
                                )),
                                uv_index: Some((6.0 * phase.sin()).clamp(0.0, 8.0).round()),
                                weather_code: Some(weather_code),
                                ..Default::default()
                            },
                        }
                    })
                    .collect();
                ForecastTimelines {
                    hourly: Some(entries),
                    daily: None,
                }
            }
            Timestep::Daily => {
                let entries = (0..DAILY_INTERVALS)
                    .map(|i| {
                        let phase = i as f64 / DAILY_INTERVALS as f64 * TAU;
                        let weather_code = Self::pick_weather_code(&mut rng);
                        let day = (now + Duration::days(i as i64)).replace_time(Time::MIDNIGHT);
                        TimelineEntry {
                            time: day,
                            values: TimelineValues {
                                temperature_max: Some(temperature_out(
                                    self.base_temperature + 2.0 + rng.gen_range(-1.0..=1.0),
                                    units,
                                )),
                                temperature_apparent_max: Some(temperature_out(
                                    self.base_temperature + 1.5 + rng.gen_range(-1.0..=1.0),
                                    units,
                                )),
                                humidity_avg: Some(
                                    (55.0 + 10.0 * phase.sin() + rng.gen_range(-5.0..=5.0))
                                        .clamp(0.0, 100.0),
                                ),
                                cloud_cover_avg: Some(
                                    (50.0 + 30.0 * (phase * 0.9).sin() + rng.gen_range(-10.0..=10.0))
                                        .clamp(0.0, 100.0),
                                ),
                                precipitation_probability_max: Some(if weather_code == 4200 {
                                    rng.gen_range(40.0..=90.0)
                                } else {
                                    rng.gen_range(0.0..=20.0)
                                }),
                                wind_speed_avg: Some(speed_out(
                                    (3.5 + 1.5 * phase.sin() + rng.gen_range(0.0..=1.0)).max(0.0),
                                    units,
                                )),
                                uv_index_max: Some(rng.gen_range(3.0..=8.0_f64).round()),
                                weather_code_max: Some(weather_code),
                                sunrise_time: Some(day + Duration::hours(6)),
                                sunset_time: Some(day + Duration::hours(20)),
                                ..Default::default()
                            },
                        }
                    })
                    .collect();
                ForecastTimelines {
                    hourly: None,
                    daily: Some(entries),
                }
            }
        };

        Ok(ForecastResponse {
            timelines,
            location: Self::echo_location(location),
        })
    }

    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<Location>, Error> {
        let mut rng = rand::thread_rng();
        let resolved = Location {
            lat: Some(rng.gen_range(-60.0..=60.0)),
            lon: Some(rng.gen_range(-180.0..=180.0)),
            name: Some(query.to_owned()),
            country: None,
        };
        Ok(vec![resolved].into_iter().take(limit).collect())
    }

    async fn check_health(&self) -> bool {
        true
    }
}
