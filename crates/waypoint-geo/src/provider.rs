//! Current-weather lookups against the OpenWeatherMap API.

use serde::Deserialize;
use tracing::instrument;
use waypoint_core::error::ensure_success;
use waypoint_core::{AppError, NetworkError};

use crate::types::{Coordinate, WeatherSample};

// Any field may arrive as `null`; missing readings count as zero.
#[derive(Debug, Default, Deserialize)]
struct WeatherResponse {
    main: Option<MainReadings>,
    weather: Option<Vec<Condition>>,
}

#[derive(Debug, Default, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
    pressure: Option<i64>,
    humidity: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct Condition {
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Current conditions at `coord`. Temperature stays in Kelvin.
    #[instrument(skip(self), level = "debug")]
    pub async fn current(&self, coord: Coordinate) -> Result<WeatherSample, AppError> {
        let lat = coord.lat_param();
        let lon = coord.lon_param();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: WeatherResponse = ensure_success(response)
            .await?
            .json::<Option<WeatherResponse>>()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?
            .unwrap_or_default();

        let condition = body
            .weather
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::DataNotFound("no weather information found".to_string()))?;
        let main = body.main.unwrap_or_default();

        Ok(WeatherSample {
            temperature: main.temp.unwrap_or_default(),
            pressure: main.pressure.unwrap_or_default(),
            humidity: main.humidity.unwrap_or_default(),
            description: condition.description.unwrap_or_default(),
        })
    }
}
