//! HTTP surface of the geo-weather service.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::{Json, Router};
use waypoint_core::http::with_cors;
use waypoint_core::Params;

use crate::service::GeoWeatherService;
use crate::types::{Coordinate, GeoWeatherError, GeoWeatherReport};

/// Router serving `GET /?lat=&lon=`.
pub fn router(service: Arc<GeoWeatherService>) -> Router {
    with_cors(
        Router::new()
            .route("/", get(geo_weather))
            .with_state(service),
    )
}

/// Parse `lat` then `lon`; either missing or non-numeric is a 400.
pub fn parse_coordinate(params: &Params) -> Result<Coordinate, GeoWeatherError> {
    let latitude = params
        .get("lat")
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(GeoWeatherError::invalid_latitude)?;
    let longitude = params
        .get("lon")
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(GeoWeatherError::invalid_longitude)?;

    Ok(Coordinate::new(latitude, longitude))
}

async fn geo_weather(
    State(service): State<Arc<GeoWeatherService>>,
    RawQuery(query): RawQuery,
) -> Result<Json<GeoWeatherReport>, GeoWeatherError> {
    let params = Params::from_query(query.as_deref());
    let coord = parse_coordinate(&params)?;
    let report = service.report(coord).await?;
    Ok(Json(report))
}
