//! Flickr photo search client.

use std::time::Duration;

use tracing::instrument;
use waypoint_core::error::ensure_success;
use waypoint_core::http::build_client;
use waypoint_core::{AppError, Config, NetworkError};

use crate::types::{PhotoError, PhotoSearchResult};

const SEARCH_METHOD: &str = "flickr.photos.search";

#[derive(Debug, Clone)]
pub struct FlickrClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    per_page: u32,
}

impl FlickrClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str, per_page: u32) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            per_page,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = build_client(Duration::from_secs(config.server.request_timeout_secs))?;
        let photos = &config.photos;
        Ok(Self::new(
            client,
            &photos.search_url,
            &photos.api_key,
            photos.per_page,
        ))
    }

    /// Search photos near `lat`/`lon`. The values are forwarded untouched,
    /// empty strings included; the provider applies its own rules.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, lat: &str, lon: &str) -> Result<PhotoSearchResult, PhotoError> {
        let per_page = self.per_page.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("method", SEARCH_METHOD),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
                ("nojsoncallback", "1"),
                ("per_page", per_page.as_str()),
                ("lat", lat),
                ("lon", lon),
            ])
            .send()
            .await
            .map_err(|e| PhotoError::Fetch(e.into()))?;

        let response = ensure_success(response).await.map_err(PhotoError::Fetch)?;

        // Flickr may label JSON as text/plain, so decode the raw bytes
        let body = response
            .bytes()
            .await
            .map_err(|e| PhotoError::Fetch(e.into()))?;

        serde_json::from_slice::<Option<PhotoSearchResult>>(&body)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                PhotoError::Decode(NetworkError::InvalidResponse(e.to_string()).into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> FlickrClient {
        FlickrClient::new(
            reqwest::Client::new(),
            &format!("{}/services/rest/", server.uri()),
            "flickr_key",
            8,
        )
    }

    #[tokio::test]
    async fn test_search_sends_fixed_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/rest/"))
            .and(query_param("method", "flickr.photos.search"))
            .and(query_param("api_key", "flickr_key"))
            .and(query_param("format", "json"))
            .and(query_param("nojsoncallback", "1"))
            .and(query_param("per_page", "8"))
            .and(query_param("lat", "51.5072"))
            .and(query_param("lon", "-0.1276"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"photos":{"page":1,"pages":1,"perpage":8,"total":1,"photo":[{"id":"1","secret":"s","server":"2","farm":3,"title":"Big Ben","ispublic":1,"isfriend":0,"isfamily":0}]},"stat":"ok"}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .search("51.5072", "-0.1276")
            .await
            .unwrap();

        assert_eq!(result.photos.photo[0].title, "Big Ben");
        assert_eq!(result.photos.perpage, 8);
    }

    #[tokio::test]
    async fn test_empty_coordinates_are_forwarded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("lat", ""))
            .and(query_param("lon", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stat": "fail", "code": 3, "message": "Parameterless searches have been disabled."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("", "").await.unwrap();
        assert_eq!(result.stat, "fail");
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("jsonFlickrApi({})"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).search("1", "2").await.unwrap_err();
        assert!(matches!(err, PhotoError::Decode(_)));
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).search("1", "2").await.unwrap_err();
        assert!(matches!(err, PhotoError::Fetch(_)));
    }
}
