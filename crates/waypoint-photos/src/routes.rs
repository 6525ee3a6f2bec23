//! HTTP surface of the photo proxy.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::{Json, Router};
use waypoint_core::http::with_cors;
use waypoint_core::Params;

use crate::client::FlickrClient;
use crate::types::{PhotoError, PhotoSearchResult};

/// Router serving `GET /photos.json?lat=&lon=`.
pub fn router(client: Arc<FlickrClient>) -> Router {
    with_cors(
        Router::new()
            .route("/photos.json", get(photos))
            .with_state(client),
    )
}

async fn photos(
    State(client): State<Arc<FlickrClient>>,
    RawQuery(query): RawQuery,
) -> Result<Json<PhotoSearchResult>, PhotoError> {
    let params = Params::from_query(query.as_deref());
    let result = client
        .search(params.get_or_empty("lat"), params.get_or_empty("lon"))
        .await?;

    tracing::debug!(
        "Proxied {} of {} photos",
        result.photos.photo.len(),
        result.photos.total
    );
    Ok(Json(result))
}
