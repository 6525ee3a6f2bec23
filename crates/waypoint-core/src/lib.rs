//! Shared foundation for the Waypoint services: configuration, error
//! taxonomy, logging and HTTP plumbing.

pub mod config;
pub mod error;
pub mod http;
pub mod params;

pub use config::{
    Coefficients, Config, GeoWeatherConfig, ParsePolicy, PhotosConfig, PredictorConfig,
    ServerConfig, ValidationResult,
};
pub use error::{plain_text, AppError, ConfigError, NetworkError, ReqwestErrorExt};
pub use params::Params;

use anyhow::Result;

/// Initialize logging for the process
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Waypoint core initialized");
    Ok(())
}
