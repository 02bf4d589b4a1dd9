/// Email relay endpoint
use axum::{
    Json,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use mailrelay_core::{
    EmailRequest, EmailResponse, RelayError, constants::MAX_REQUEST_BODY_BYTES,
};
use std::sync::Arc;
use tracing::warn;

use crate::{context::ApiContext, error::ApiError};

/// Relay handler
///
/// `OPTIONS` is acknowledged without looking at the body; every other
/// method except `POST` is rejected before the body is read. A `POST` body
/// larger than `MAX_REQUEST_BODY_BYTES` is treated like an unparseable one.
pub async fn handler(
    State(ctx): State<Arc<ApiContext>>,
    request: Request,
) -> Result<Response, ApiError> {
    let method = request.method().clone();

    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        return Err(RelayError::MethodNotAllowed(method.to_string()).into());
    }

    let body = match axum::body::to_bytes(request.into_body(), MAX_REQUEST_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, limit = MAX_REQUEST_BODY_BYTES, "Discarding unreadable request body");
            Default::default()
        }
    };

    let request = EmailRequest::from_json_bytes(&body);
    let sent = ctx.relay.relay(request).await?;

    Ok(Json(EmailResponse::sent(sent)).into_response())
}
