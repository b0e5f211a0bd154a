//! HTTP error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::delivery::DeliveryError;

/// Errors returned to the storefront. Bodies carry a short `detail` string
/// only; upstream specifics stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    BadBody,

    #[error("Invalid pincode")]
    InvalidPincode,

    #[error("API token not configured")]
    Misconfigured,

    #[error("Unable to reach courier API")]
    Upstream,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadBody | ApiError::InvalidPincode => StatusCode::BAD_REQUEST,
            ApiError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::InvalidInput(_) => ApiError::InvalidPincode,
            DeliveryError::Misconfigured => {
                tracing::error!("Courier API token missing; set DELHIVERY_API_TOKEN");
                ApiError::Misconfigured
            }
            DeliveryError::UpstreamUnavailable(e) => {
                tracing::error!(error = %e, "Courier call failed");
                ApiError::Upstream
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadBody
    }
}
