//! Route handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::delivery::DeliveryCheck;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Body of `POST /api/check-delivery`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDeliveryRequest {
    pub pincode: String,
}

pub async fn check_delivery(
    State(state): State<AppState>,
    payload: Result<Json<CheckDeliveryRequest>, JsonRejection>,
) -> Result<Json<DeliveryCheck>, ApiError> {
    let Json(request) = payload?;
    let check = state.service.check(&request.pincode).await?;
    Ok(Json(check))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub courier_configured: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        courier_configured: state.service.is_configured(),
    })
}
