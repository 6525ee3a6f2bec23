//! HTTP plumbing shared by the services: the outbound client, the CORS
//! headers every response carries, and the listener loop.

use std::time::Duration;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::{plain_text, AppError};

pub const USER_AGENT: &str = concat!("waypoint/", env!("CARGO_PKG_VERSION"));

/// Build the outbound client used for provider calls.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Attach the permissive cross-origin headers to every response, including
/// errors and unmatched paths.
pub fn with_cors(router: Router) -> Router {
    router
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
}

async fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "404 page not found")
}

/// Bind `host:port` and serve `router` until Ctrl-C.
pub async fn serve(name: &str, router: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!("{} listening on http://{}", name, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} stopped", name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
