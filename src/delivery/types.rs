//! Delivery check results and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::courier::CourierError;

/// Errors that end a delivery check without a result.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The pincode is not exactly six digits.
    #[error("invalid pincode: {0:?}")]
    InvalidInput(String),

    /// The courier API token is missing from the deployment.
    #[error("courier API token not configured")]
    Misconfigured,

    /// Any courier call failed.
    #[error("courier unavailable: {0}")]
    UpstreamUnavailable(#[from] CourierError),
}

/// Estimate for one shipment mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeEstimate {
    pub days: u32,
    pub eta: String,
    pub extra_charge: f64,
}

/// Details present only when the pincode is serviceable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    pub cod_available: bool,
    pub district: String,
    pub state_code: String,
    pub surface: ModeEstimate,
    pub air: ModeEstimate,
}

/// Outcome of a delivery check. Serializes to `{"serviceable": false}` or
/// the flag followed by the quote fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCheck {
    pub serviceable: bool,
    #[serde(flatten)]
    pub quote: Option<DeliveryQuote>,
}

impl DeliveryCheck {
    pub fn not_serviceable() -> Self {
        Self {
            serviceable: false,
            quote: None,
        }
    }

    pub fn serviceable(quote: DeliveryQuote) -> Self {
        Self {
            serviceable: true,
            quote: Some(quote),
        }
    }
}
