use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};
use waypoint_core::{plain_text, AppError};

/// Decode `null` as the type's empty value, the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flickr `photos.search` payload, passed through to callers as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub photos: PhotoPage,
    #[serde(deserialize_with = "null_as_default")]
    pub stat: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoPage {
    #[serde(deserialize_with = "null_as_default")]
    pub page: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub perpage: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub photo: Vec<Photo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub secret: String,
    #[serde(deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(deserialize_with = "null_as_default")]
    pub farm: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ispublic: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub isfriend: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub isfamily: i64,
}

/// Photo proxy failures. Callers only ever see a generic message; the
/// wrapped cause is logged.
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Failed to fetch photos")]
    Fetch(#[source] AppError),

    #[error("Failed to decode photos")]
    Decode(#[source] AppError),
}

impl PhotoError {
    pub fn inner(&self) -> &AppError {
        match self {
            Self::Fetch(e) | Self::Decode(e) => e,
        }
    }
}

impl IntoResponse for PhotoError {
    fn into_response(self) -> Response {
        tracing::error!("{}: {}", self, self.inner());
        plain_text(StatusCode::INTERNAL_SERVER_ERROR, self)
    }
}
