use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::scoring::{
    ConfigurationError, Discretizer, DiscretizerConfig, StarMode, StarScale,
    DEFAULT_ARROW_THRESHOLD,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringSettings::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Discretizer presets and the optional outcome catalog file.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub star_mode: StarMode,
    pub discretizer: DiscretizerConfig,
    pub outcome_catalog: Option<PathBuf>,
}

impl ScoringSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let star_mode = match env::var("APP_STAR_MODE") {
            Ok(raw) => StarMode::parse(&raw).ok_or(ConfigError::InvalidStarMode(raw))?,
            Err(_) => StarMode::Five,
        };

        let mut discretizer = DiscretizerConfig::for_mode(star_mode);

        if let Ok(raw) = env::var("APP_CONTRIBUTION_THRESHOLDS") {
            let thresholds = parse_thresholds(&raw)?;
            discretizer.contribution_scale =
                StarScale::new(discretizer.contribution_scale.max_stars(), thresholds)?;
        }

        discretizer.arrow_threshold = match env::var("APP_ARROW_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidThresholdList(raw.clone()))?,
            Err(_) => DEFAULT_ARROW_THRESHOLD,
        };

        // Fail fast on an unusable arrow threshold before the service starts.
        Discretizer::new(discretizer.clone())?;

        let outcome_catalog = env::var("APP_OUTCOME_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            star_mode,
            discretizer,
            outcome_catalog,
        })
    }

    /// Switches to another star mode. Custom contribution thresholds are
    /// kept and must match the new mode's star count.
    pub fn with_star_mode(mut self, mode: StarMode) -> Result<Self, ConfigError> {
        if mode == self.star_mode {
            return Ok(self);
        }

        let preset = DiscretizerConfig::for_mode(mode);
        let current = &self.discretizer.contribution_scale;
        let contribution_scale = if *current == StarScale::contribution_preset(self.star_mode) {
            preset.contribution_scale
        } else {
            StarScale::new(preset.contribution_scale.max_stars(), current.thresholds().to_vec())?
        };

        self.star_mode = mode;
        self.discretizer = DiscretizerConfig {
            contribution_scale,
            importance_scale: preset.importance_scale,
            arrow_threshold: self.discretizer.arrow_threshold,
        };
        Ok(self)
    }

    pub fn build_discretizer(&self) -> Result<Discretizer, ConfigError> {
        Ok(Discretizer::new(self.discretizer.clone())?)
    }
}

fn parse_thresholds(raw: &str) -> Result<Vec<f64>, ConfigError> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidThresholdList(raw.to_string()))
        })
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidStarMode(String),
    InvalidThresholdList(String),
    Discretizer(ConfigurationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidStarMode(value) => {
                write!(f, "APP_STAR_MODE must be 'three' or 'five', got '{value}'")
            }
            ConfigError::InvalidThresholdList(value) => {
                write!(f, "threshold setting '{value}' must be comma-separated numbers")
            }
            ConfigError::Discretizer(err) => write!(f, "invalid discretizer settings: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Discretizer(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidStarMode(_)
            | ConfigError::InvalidThresholdList(_) => None,
        }
    }
}

impl From<ConfigurationError> for ConfigError {
    fn from(value: ConfigurationError) -> Self {
        Self::Discretizer(value)
    }
}
