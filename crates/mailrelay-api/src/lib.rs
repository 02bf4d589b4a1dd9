/// Mailrelay API - SMTP relay Lambda
///
/// This module contains the single relay endpoint and the glue that runs it
/// inside the Lambda HTTP runtime.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    body::Body as AxumBody,
    http::{HeaderValue, header},
    middleware as axum_middleware,
};
use lambda_http::{Body, Error as LambdaError, Request, Response};
use mailrelay_core::constants::{CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

/// Build the relay router.
///
/// Every path reaches the relay handler; the function URL is the endpoint.
pub fn router(ctx: Arc<ApiContext>) -> Router {
    Router::new()
        .fallback(api::send::handler)
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // CORS headers on every response, including errors and preflight
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .with_state(ctx)
}

/// Main API handler - converts Lambda HTTP request to Axum router
pub async fn handler(ctx: Arc<ApiContext>, event: Request) -> Result<Response<Body>, LambdaError> {
    info!("Processing API request: {} {}", event.method(), event.uri().path());

    let app = router(ctx);

    // Convert Lambda HTTP request to Axum request
    let (parts, body) = event.into_parts();
    let axum_request = http::Request::from_parts(parts, AxumBody::from(body.to_vec()));

    // Process request with Axum
    let response = app.oneshot(axum_request).await?;
    let (parts, body) = response.into_parts();

    // Convert Axum response body to Lambda response body
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(Response::from_parts(parts, Body::from(body_bytes.to_vec())))
}
