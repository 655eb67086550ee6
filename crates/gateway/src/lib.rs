mod app_error;
mod batch;
pub mod db;
mod jwt_auth;
pub mod location;
pub mod provider;
mod routes;
mod startup;
mod utils;
pub mod weather;

pub use app_error::AppError;
pub use batch::{fetch_batch, MAX_BATCH_LOCATIONS};
pub use db::{MongoAccess, MongoData};
pub use jwt_auth::{
    sign_token, verify_token, AccessToken, AuthError, DecodedToken, JwtAuth, JwtConfig,
    OptionalJwtAuth, RefreshToken, ACCESS_TOKEN_COOKIE,
};
pub use location::{resolve, Location, LocationQuery};
pub use provider::{MockProvider, TomorrowClient, WeatherProvider};
pub use routes::*;
pub use startup::{app, build_app_state, AppState};
pub use utils::*;
pub use weather::{
    categorize, describe, normalize, Category, CompactWeatherData, EssentialWeather, ForecastData,
    ForecastInterval, Format, Timestep, Units, WeatherData,
};
