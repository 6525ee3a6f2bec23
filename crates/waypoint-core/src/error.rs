//! Centralized error types shared by the Waypoint services.
//!
//! This module provides a typed error hierarchy that:
//! - Separates caller mistakes (400) from upstream and lookup failures (500)
//! - Classifies outbound `reqwest` failures into a small set of variants
//! - Renders as a plain-text HTTP response at the handler boundary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Top-level service error type.
///
/// Every handler error is convertible to this type. Use `status()` to get
/// the HTTP status the error maps to.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or unparseable required request parameter.
    #[error("{0}")]
    Input(String),

    /// Third-party API failed: transport, non-2xx status or undecodable body.
    #[error("{0}")]
    Upstream(#[from] NetworkError),

    /// Upstream answered with a well-formed but empty result set.
    #[error("{0}")]
    DataNotFound(String),

    /// A derived key is absent from a static lookup table.
    #[error("{0}")]
    LookupMiss(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::DataNotFound(_) | AppError::LookupMiss(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        plain_text(self.status(), self.to_string())
    }
}

/// Plain-text response with a trailing newline, the body shape every
/// service uses for its error paths.
pub fn plain_text(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (status, format!("{}\n", message)).into_response()
}

/// Network-related errors (HTTP, connectivity, payload decoding).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.into_network_error())
    }
}

/// Check an upstream response status, turning non-2xx answers into
/// `NetworkError::ServerError` with the body text as the message.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(NetworkError::ServerError {
        status: status.as_u16(),
        message: text,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_bad_request() {
        let err = AppError::Input("Invalid latitude".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_side_errors_are_500() {
        let errors = vec![
            AppError::Upstream(NetworkError::Timeout),
            AppError::DataNotFound("no location found".into()),
            AppError::LookupMiss("state not found in the map".into()),
        ];

        for err in errors {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", err);
        }
    }

    #[test]
    fn test_network_error_conversion() {
        let app_err: AppError = NetworkError::Timeout.into();
        assert!(matches!(app_err, AppError::Upstream(NetworkError::Timeout)));
        assert_eq!(app_err.to_string(), "Request timed out");
    }

    #[test]
    fn test_server_error_display() {
        let err = NetworkError::ServerError {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "Server error: 503 - maintenance");
    }

    #[tokio::test]
    async fn test_into_response_is_plain_text() {
        let response = AppError::LookupMiss("state not found in the map".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"state not found in the map\n");
    }
}
