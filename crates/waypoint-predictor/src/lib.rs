//! House price predictor for Waypoint
//!
//! Evaluates a linear regression over fixed coefficients for the features
//! passed as request parameters.

pub mod model;
pub mod routes;

pub use model::{evaluate, truncate, HouseFeatures, Predictor, FEATURE_FIELDS};
pub use routes::{router, Prediction};
