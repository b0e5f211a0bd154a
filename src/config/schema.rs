//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the courier API token.
pub const TOKEN_ENV_VAR: &str = "DELHIVERY_API_TOKEN";

/// Root configuration for the delivery-check relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream courier endpoints and call budgets.
    pub courier: CourierConfig,

    /// Flat extra charge per shipment mode.
    pub charges: ChargeConfig,

    /// Cross-origin policy for the storefront.
    pub cors: CorsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Inbound request limits.
    pub limits: LimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Courier API token. Never read from the config file; populated from
    /// the environment at startup.
    #[serde(skip)]
    pub api_token: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// What to do when a transit response omits `estimated_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingEstimatePolicy {
    /// Treat the response as an upstream failure (502).
    #[default]
    Reject,
    /// Substitute the per-mode default and log a warning.
    Fallback,
}

/// Upstream courier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Pincode serviceability lookup endpoint.
    pub pincode_url: String,

    /// Transit time estimation endpoint.
    pub transit_url: String,

    /// Origin pincode of every shipment (the warehouse).
    pub pickup_pincode: String,

    /// Per-call timeout in seconds.
    pub request_timeout_secs: u64,

    /// Shared budget for the concurrent transit calls in seconds.
    pub transit_budget_secs: u64,

    pub missing_estimate: MissingEstimatePolicy,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            pincode_url: "https://track.delhivery.com/c/api/pin-codes/json/".to_string(),
            transit_url: "https://track.delhivery.com/api/dc/expected_tat".to_string(),
            pickup_pincode: "226002".to_string(),
            request_timeout_secs: 10,
            transit_budget_secs: 20,
            missing_estimate: MissingEstimatePolicy::Reject,
        }
    }
}

/// Flat extra charge added per shipment mode, in rupees.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChargeConfig {
    pub surface: f64,
    pub air: f64,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            surface: 0.0,
            air: 60.0,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The single storefront origin allowed to call the relay.
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "https://icwi40-p0.myshopify.com".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Must exceed the courier lookup timeout plus the transit budget.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 35 }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 4 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl RelayConfig {
    /// Returns the API token if one is configured and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}
