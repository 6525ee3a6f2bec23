//! Geo-weather service for Waypoint
//!
//! Reverse-geocodes a coordinate via MapQuest, looks up the state's
//! adjacency figure, and reports the current OpenWeatherMap temperature.

pub mod geocode;
pub mod provider;
pub mod routes;
pub mod service;
pub mod states;
pub mod types;

pub use geocode::GeocodeClient;
pub use provider::WeatherProvider;
pub use routes::router;
pub use service::GeoWeatherService;
pub use types::*;
