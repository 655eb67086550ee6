use clap::{command, Parser};
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::{env, fs::File, io::Read};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Settings.toml file holding the rest of the cli options
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set the log level (default: info)
    #[arg(short, long)]
    pub level: Option<String>,

    /// Host to listen at (default: 127.0.0.1)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Port to listen on (default: 3000)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Base URL of the upstream weather provider (default: https://api.tomorrow.io/v4)
    #[arg(long, env = "WEATHER_BASE_URL")]
    pub weather_base_url: Option<String>,

    /// API key for the upstream weather provider
    #[arg(long, env = "WEATHER_API_KEY")]
    pub weather_api_key: Option<String>,

    /// Serve synthetic weather data instead of calling the upstream provider
    #[arg(long, env = "USE_MOCK_WEATHER")]
    pub use_mock_weather: Option<bool>,

    /// Secret used to verify and sign JWT auth tokens
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Default expiry in seconds for issued JWT tokens (default: 3600)
    #[arg(long, env = "JWT_EXPIRY_SECS")]
    pub jwt_expiry_secs: Option<i64>,

    /// Mongo connection URI (default: mongodb://127.0.0.1:27017)
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: Option<String>,
}

impl Cli {
    pub fn weather_base_url(&self) -> String {
        self.weather_base_url
            .clone()
            .unwrap_or_else(|| String::from("https://api.tomorrow.io/v4"))
    }

    pub fn use_mock_weather(&self) -> bool {
        self.use_mock_weather.unwrap_or(false)
    }

    pub fn jwt_expiry_secs(&self) -> i64 {
        self.jwt_expiry_secs.unwrap_or(3600)
    }

    pub fn mongo_uri(&self) -> String {
        self.mongo_uri
            .clone()
            .unwrap_or_else(|| String::from("mongodb://127.0.0.1:27017"))
    }
}

pub fn get_config_info() -> Cli {
    let mut cli = Cli::parse();

    if let Some(config_path) = cli.config.clone() {
        if let Ok(mut file) = File::open(config_path) {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .expect("Failed to read config file");
            cli = toml::from_str(&content).expect("Failed to deserialize config")
        };
    };
    cli
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    if cli.level.is_some() {
        let level = cli.level.as_ref().unwrap();
        match level.as_ref() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    } else {
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| String::from(""));
        match rust_log.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc().format(&Iso8601::DEFAULT).unwrap(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
