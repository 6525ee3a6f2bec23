//! Combines geocoding, the state table and the weather lookup into one report.

use std::time::Duration;

use waypoint_core::http::build_client;
use waypoint_core::{AppError, Config};

use crate::geocode::GeocodeClient;
use crate::provider::WeatherProvider;
use crate::states;
use crate::types::{Coordinate, GeoWeatherError, GeoWeatherReport};

#[derive(Debug, Clone)]
pub struct GeoWeatherService {
    geocoder: GeocodeClient,
    weather: WeatherProvider,
}

impl GeoWeatherService {
    pub fn new(geocoder: GeocodeClient, weather: WeatherProvider) -> Self {
        Self { geocoder, weather }
    }

    /// Build the service and its outbound client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = build_client(Duration::from_secs(config.server.request_timeout_secs))?;
        let geo = &config.geo_weather;

        Ok(Self::new(
            GeocodeClient::new(client.clone(), &geo.geocode_url, &geo.geocode_api_key),
            WeatherProvider::new(client, &geo.weather_url, &geo.weather_api_key),
        ))
    }

    /// One geocode call feeds both the address and the state lookup; the
    /// weather call runs alongside it. Failures are reported in stage order:
    /// address, state, weather.
    pub async fn report(&self, coord: Coordinate) -> Result<GeoWeatherReport, GeoWeatherError> {
        let (address, weather) = tokio::join!(
            self.geocoder.reverse_geocode(coord),
            self.weather.current(coord)
        );

        let address = address.map_err(GeoWeatherError::Address)?;
        let state_adjacent =
            states::adjacency_for(&address.state).map_err(GeoWeatherError::StateAdjacency)?;
        let weather = weather.map_err(GeoWeatherError::Weather)?;

        tracing::info!(
            "Report for {},{}: state {} -> {}, {} K, {} ({} hPa, {}% humidity)",
            coord.latitude,
            coord.longitude,
            address.state,
            state_adjacent,
            weather.temperature,
            weather.description,
            weather.pressure,
            weather.humidity
        );

        Ok(GeoWeatherReport {
            address: address.to_string(),
            state_adjacent,
            temperature: weather.temperature,
        })
    }
}
