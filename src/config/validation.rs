//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, charges >= 0)
//! - Check that upstream URLs and the CORS origin are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::delivery::Pincode;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("courier.pickup_pincode: '{0}' is not a 6-digit pincode")]
    InvalidPickupPincode(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "timeouts.request_secs ({request}) must exceed courier.request_timeout_secs + courier.transit_budget_secs ({upstream})"
    )]
    RequestTimeoutTooShort { request: u64, upstream: u64 },

    #[error("charges.{0} must not be negative")]
    NegativeCharge(&'static str),

    #[error("cors.allowed_origin: '{0}' is not a valid origin")]
    InvalidOrigin(String),

    #[error("listener.bind_address: '{0}' is not a socket address")]
    InvalidBindAddress(String),
}

pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (field, value) in [
        ("courier.pincode_url", &config.courier.pincode_url),
        ("courier.transit_url", &config.courier.transit_url),
    ] {
        if url::Url::parse(value).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    if Pincode::parse(&config.courier.pickup_pincode).is_err() {
        errors.push(ValidationError::InvalidPickupPincode(
            config.courier.pickup_pincode.clone(),
        ));
    }

    for (field, secs) in [
        ("courier.request_timeout_secs", config.courier.request_timeout_secs),
        ("courier.transit_budget_secs", config.courier.transit_budget_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    // Lookup and transit calls run back to back inside one request.
    let upstream = config
        .courier
        .request_timeout_secs
        .saturating_add(config.courier.transit_budget_secs);
    if config.timeouts.request_secs <= upstream {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: config.timeouts.request_secs,
            upstream,
        });
    }

    for (field, charge) in [("surface", config.charges.surface), ("air", config.charges.air)] {
        if charge.is_nan() || charge < 0.0 {
            errors.push(ValidationError::NegativeCharge(field));
        }
    }

    let origin = &config.cors.allowed_origin;
    if url::Url::parse(origin).is_err() || HeaderValue::from_str(origin).is_err() {
        errors.push(ValidationError::InvalidOrigin(origin.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn test_request_timeout_must_outlast_upstream_calls() {
        let mut config = RelayConfig::default();
        config.timeouts.request_secs = 30;

        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RequestTimeoutTooShort {
                request: 30,
                upstream: 30,
            }])
        );

        config.timeouts.request_secs = 31;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RelayConfig::default();
        config.courier.pickup_pincode = "2260".into();
        config.courier.transit_url = "not a url".into();
        config.courier.request_timeout_secs = 0;
        config.charges.air = -1.0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidPickupPincode("2260".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout("courier.request_timeout_secs")));
        assert!(errors.contains(&ValidationError::NegativeCharge("air")));
    }

    #[test]
    fn test_rejects_bad_origin() {
        let mut config = RelayConfig::default();
        config.cors.allowed_origin = "shop\nexample".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidOrigin(_)));
    }
}
