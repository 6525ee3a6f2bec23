//! Reverse geocoding: convert coordinates to a structured postal address.
//! Uses the MapQuest reverse geocoding API.

use serde::Deserialize;
use tracing::instrument;
use waypoint_core::error::ensure_success;
use waypoint_core::{AppError, NetworkError};

use crate::types::{Address, Coordinate};

// MapQuest sends `null` for fields it has no value for, so every field is
// optional and collapses to its empty value on conversion.
#[derive(Debug, Default, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Default, Deserialize)]
struct GeocodeResult {
    locations: Option<Vec<MapQuestLocation>>,
}

#[derive(Debug, Default, Deserialize)]
struct MapQuestLocation {
    street: Option<String>,
    #[serde(rename = "adminArea5")]
    city: Option<String>,
    #[serde(rename = "adminArea4")]
    county: Option<String>,
    #[serde(rename = "adminArea3")]
    state: Option<String>,
    #[serde(rename = "adminArea1")]
    country: Option<String>,
    #[serde(rename = "postalCode")]
    postal_code: Option<String>,
}

impl From<MapQuestLocation> for Address {
    fn from(loc: MapQuestLocation) -> Self {
        Self {
            street: loc.street.unwrap_or_default(),
            city: loc.city.unwrap_or_default(),
            county: loc.county.unwrap_or_default(),
            state: loc.state.unwrap_or_default(),
            country: loc.country.unwrap_or_default(),
            postal_code: loc.postal_code.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Address of the first location of the first result for `coord`.
    #[instrument(skip(self), level = "debug")]
    pub async fn reverse_geocode(&self, coord: Coordinate) -> Result<Address, AppError> {
        let location = format!("{},{}", coord.lat_param(), coord.lon_param());

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("location", location.as_str()),
                ("outFormat", "json"),
                ("thumbMaps", "false"),
            ])
            .send()
            .await?;

        let body: GeocodeResponse = ensure_success(response)
            .await?
            .json::<Option<GeocodeResponse>>()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?
            .unwrap_or_default();

        let address = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.locations.unwrap_or_default().into_iter().next())
            .map(Address::from)
            .ok_or_else(|| {
                AppError::DataNotFound("no location found for the given coordinates".to_string())
            })?;

        tracing::debug!("Reverse geocoded to: {}", address);
        Ok(address)
    }
}
