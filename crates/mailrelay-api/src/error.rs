/// API Error types
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use mailrelay_core::constants::CORS_ALLOW_METHODS;
use mailrelay_core::{EmailResponse, ErrorCode, RelayError};

/// A relay failure rendered as a JSON `EmailResponse`
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RelayError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status =
            StatusCode::from_u16(code.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(EmailResponse::failed(&self.0))).into_response();

        if code == ErrorCode::MethodNotAllowed {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(CORS_ALLOW_METHODS));
        }

        response
    }
}
