//! Photo proxy for Waypoint
//!
//! Forwards nearby-photo searches to Flickr and re-serves the payload as JSON.

pub mod client;
pub mod routes;
pub mod types;

pub use client::FlickrClient;
pub use routes::router;
pub use types::{Photo, PhotoError, PhotoPage, PhotoSearchResult};
