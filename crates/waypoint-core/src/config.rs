use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variables that override provider credentials from the file.
pub const ENV_MAPQUEST_API_KEY: &str = "MAPQUEST_API_KEY";
pub const ENV_OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_FLICKR_API_KEY: &str = "FLICKR_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings shared by every service
    pub server: ServerConfig,

    /// Reverse geocoding + weather service
    pub geo_weather: GeoWeatherConfig,

    /// Photo search proxy
    pub photos: PhotosConfig,

    /// House price predictor
    pub predictor: PredictorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface every service binds to
    pub host: String,

    /// Upper bound on each outbound provider call
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoWeatherConfig {
    pub port: u16,

    /// MapQuest reverse geocoding endpoint
    pub geocode_url: String,

    /// MapQuest API key (overridden by `MAPQUEST_API_KEY`)
    pub geocode_api_key: String,

    /// OpenWeatherMap current weather endpoint
    pub weather_url: String,

    /// OpenWeatherMap API key (overridden by `OPENWEATHER_API_KEY`)
    pub weather_api_key: String,
}

impl Default for GeoWeatherConfig {
    fn default() -> Self {
        Self {
            port: 10000,
            geocode_url: "http://www.mapquestapi.com/geocoding/v1/reverse".to_string(),
            geocode_api_key: String::new(),
            weather_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            weather_api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    pub port: u16,

    /// Flickr REST endpoint
    pub search_url: String,

    /// Flickr API key (overridden by `FLICKR_API_KEY`)
    pub api_key: String,

    /// Photos per search page
    pub per_page: u32,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            search_url: "https://api.flickr.com/services/rest/".to_string(),
            api_key: String::new(),
            per_page: 8,
        }
    }
}

/// How the predictor treats numeric parameters that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Missing or malformed values count as zero.
    #[default]
    Lenient,
    /// Missing or malformed values reject the request with 400.
    Strict,
}

/// Linear regression coefficients for the price predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    pub theta0: f64,
    pub area: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub stories: f64,
    pub mainroad: f64,
    pub guestroom: f64,
    pub basement: f64,
    pub hotwaterheating: f64,
    pub airconditioning: f64,
    pub parking: f64,
    pub prefarea: f64,
}

impl Coefficients {
    /// Named values in a stable order, for validation and logging.
    pub fn named(&self) -> [(&'static str, f64); 12] {
        [
            ("theta0", self.theta0),
            ("area", self.area),
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("stories", self.stories),
            ("mainroad", self.mainroad),
            ("guestroom", self.guestroom),
            ("basement", self.basement),
            ("hotwaterheating", self.hotwaterheating),
            ("airconditioning", self.airconditioning),
            ("parking", self.parking),
            ("prefarea", self.prefarea),
        ]
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            theta0: 0.204_856_505_057_528_98,
            area: 875.967_764_674_579_8,
            bedrooms: 0.668_644_417_449_272_7,
            bathrooms: 0.326_288_842_434_752_54,
            stories: 0.475_391_147_918_657_5,
            mainroad: 0.187_433_147_953_981_44,
            guestroom: 0.054_803_030_297_808_56,
            basement: 0.094_260_906_397_816_22,
            hotwaterheating: 0.016_661_964_079_286_98,
            airconditioning: 0.108_548_236_398_271_31,
            parking: 0.171_521_315_417_603_51,
            prefarea: 0.067_827_002_946_698_01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub port: u16,

    /// Treatment of unparseable inputs
    pub parse_policy: ParsePolicy,

    /// Fixed model coefficients
    pub coefficients: Coefficients,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            parse_policy: ParsePolicy::default(),
            coefficients: Coefficients::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`. A missing default file yields the built-in defaults;
    /// a missing explicit file is an error. Environment overrides are applied
    /// last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.display().to_string()).into());
                }
                Self::load_file(path)?
            }
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    Self::load_file(&default_path)?
                } else {
                    tracing::debug!(
                        "No config at {}, using defaults",
                        default_path.display()
                    );
                    Self::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = Self::load(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Parse configuration from TOML text. Absent sections and fields take
    /// their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Replace provider credentials with non-empty values from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (ENV_MAPQUEST_API_KEY, &mut self.geo_weather.geocode_api_key),
            (ENV_OPENWEATHER_API_KEY, &mut self.geo_weather.weather_api_key),
            (ENV_FLICKR_API_KEY, &mut self.photos.api_key),
        ];

        for (name, slot) in targets {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.host.trim().is_empty() {
            result.add_error("server.host", "Host must not be empty");
        }

        if self.server.request_timeout_secs == 0 {
            result.add_error(
                "server.request_timeout_secs",
                "Timeout must be greater than 0",
            );
        } else if self.server.request_timeout_secs > 120 {
            result.add_warning(
                "server.request_timeout_secs",
                "Timeout is unusually long (>120s)",
            );
        }

        // Ports
        for (field, port) in [
            ("geo_weather.port", self.geo_weather.port),
            ("photos.port", self.photos.port),
            ("predictor.port", self.predictor.port),
        ] {
            if port == 0 {
                result.add_error(field, "Port cannot be 0");
            }
        }

        // Provider endpoints
        self.validate_url(&self.geo_weather.geocode_url, "geo_weather.geocode_url", &mut result);
        self.validate_url(&self.geo_weather.weather_url, "geo_weather.weather_url", &mut result);
        self.validate_url(&self.photos.search_url, "photos.search_url", &mut result);

        // Credentials: the services still start, upstream calls will fail
        for (field, key, env) in [
            (
                "geo_weather.geocode_api_key",
                &self.geo_weather.geocode_api_key,
                ENV_MAPQUEST_API_KEY,
            ),
            (
                "geo_weather.weather_api_key",
                &self.geo_weather.weather_api_key,
                ENV_OPENWEATHER_API_KEY,
            ),
            ("photos.api_key", &self.photos.api_key, ENV_FLICKR_API_KEY),
        ] {
            if key.trim().is_empty() {
                result.add_warning(field, format!("API key not configured (set {})", env));
            }
        }

        if self.photos.per_page == 0 {
            result.add_error("photos.per_page", "per_page must be greater than 0");
        } else if self.photos.per_page > 500 {
            result.add_warning("photos.per_page", "Provider caps per_page at 500");
        }

        for (name, value) in self.predictor.coefficients.named() {
            if !value.is_finite() {
                result.add_error(
                    format!("predictor.coefficients.{}", name),
                    "Coefficient must be a finite number",
                );
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Get the path to the default configuration file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("waypoint");

        Ok(config_dir.join("config.toml"))
    }
}
