use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use waypoint_core::{plain_text, AppError};

/// Geographic coordinate in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude with six decimals, the precision providers are queried with
    pub fn lat_param(&self) -> String {
        format!("{:.6}", self.latitude)
    }

    /// Longitude with six decimals
    pub fn lon_param(&self) -> String {
        format!("{:.6}", self.longitude)
    }
}

/// Structured postal address from the first geocoding match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub county: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {} {}",
            self.street, self.city, self.county, self.state, self.country, self.postal_code
        )
    }
}

/// Current conditions for a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Kelvin, as reported by the provider
    pub temperature: f64,
    pub pressure: i64,
    pub humidity: i64,
    /// First condition description (e.g. "light rain")
    pub description: String,
}

/// Response body of the geo-weather endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoWeatherReport {
    pub address: String,
    /// Table value formatted with two decimals
    pub state_adjacent: String,
    pub temperature: f64,
}

/// Geo-weather failures, tagged with the stage that produced them
#[derive(Debug, thiserror::Error)]
pub enum GeoWeatherError {
    #[error(transparent)]
    Input(AppError),

    #[error("Error getting address: {0}")]
    Address(#[source] AppError),

    #[error("Error getting adjacent value: {0}")]
    StateAdjacency(#[source] AppError),

    #[error("Error getting weather information: {0}")]
    Weather(#[source] AppError),
}

impl GeoWeatherError {
    pub fn inner(&self) -> &AppError {
        match self {
            Self::Input(e) | Self::Address(e) | Self::StateAdjacency(e) | Self::Weather(e) => e,
        }
    }

    pub fn invalid_latitude() -> Self {
        Self::Input(AppError::Input("Invalid latitude".to_string()))
    }

    pub fn invalid_longitude() -> Self {
        Self::Input(AppError::Input("Invalid longitude".to_string()))
    }
}

impl IntoResponse for GeoWeatherError {
    fn into_response(self) -> Response {
        let status = self.inner().status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        plain_text(status, self)
    }
}
