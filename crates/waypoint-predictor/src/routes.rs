//! HTTP surface of the price predictor.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use waypoint_core::http::with_cors;
use waypoint_core::{AppError, Params};

use crate::model::Predictor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub predicted_value: i64,
}

/// Router serving `GET|POST /` with the house features as parameters.
pub fn router(predictor: Arc<Predictor>) -> Router {
    with_cors(
        Router::new()
            .route("/", get(predict).post(predict))
            .with_state(predictor),
    )
}

/// Query parameters, shadowed by url-encoded form fields from the body.
fn request_params(query: Option<&str>, headers: &HeaderMap, body: &Bytes) -> Params {
    let query = Params::from_query(query);

    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if !is_form || body.is_empty() {
        return query;
    }

    match std::str::from_utf8(body) {
        Ok(form) => Params::parse(form).merged_over(query),
        Err(e) => {
            tracing::debug!("Ignoring non-UTF-8 form body: {}", e);
            query
        }
    }
}

async fn predict(
    State(predictor): State<Arc<Predictor>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Prediction>, AppError> {
    let params = request_params(query.as_deref(), &headers, &body);
    let predicted_value = predictor.predict_params(&params).inspect_err(|e| {
        tracing::debug!("Rejected prediction request ({:?} policy): {}", predictor.policy(), e);
    })?;
    Ok(Json(Prediction { predicted_value }))
}
