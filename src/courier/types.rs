//! Courier wire types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Generic estimate used when the serviceability record carries none.
pub const DEFAULT_ESTIMATED_DAYS: u32 = 7;

/// Surface estimate used under the fallback policy.
pub const DEFAULT_SURFACE_DAYS: u32 = 5;

/// Air estimate used under the fallback policy.
pub const DEFAULT_AIR_DAYS: u32 = 2;

/// Shipment service tier. Serialized as the upstream `shipment_mode` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentMode {
    /// Ground delivery.
    Surface,
    /// Expedited delivery.
    Air,
}

impl ShipmentMode {
    /// Estimate substituted for a missing upstream value.
    pub fn fallback_days(self) -> u32 {
        match self {
            ShipmentMode::Surface => DEFAULT_SURFACE_DAYS,
            ShipmentMode::Air => DEFAULT_AIR_DAYS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShipmentMode::Surface => "surface",
            ShipmentMode::Air => "air",
        }
    }
}

impl std::fmt::Display for ShipmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to the courier.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Connection failed or the request could not be sent.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call did not complete within its deadline.
    #[error("courier call timed out")]
    Timeout,

    /// Upstream answered with a non-2xx status.
    #[error("courier returned HTTP {0}")]
    Status(u16),

    /// Upstream body was not the expected JSON.
    #[error("malformed courier response: {0}")]
    Decode(String),

    /// Transit response lacked `estimated_days`.
    #[error("courier omitted estimated days for {0} shipment")]
    MissingEstimate(ShipmentMode),
}

impl From<reqwest::Error> for CourierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CourierError::Timeout
        } else if err.is_decode() {
            CourierError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CourierError::Status(status.as_u16())
        } else {
            CourierError::Transport(err.to_string())
        }
    }
}

/// Result type for courier operations.
pub type CourierResult<T> = Result<T, CourierError>;

/// Serviceability of one destination pincode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceabilityRecord {
    pub pin: String,
    pub district: String,
    pub state_code: String,
    pub cod_available: bool,
    pub estimated_days: Option<u32>,
}

impl ServiceabilityRecord {
    pub fn estimated_days_or_default(&self) -> u32 {
        self.estimated_days.unwrap_or(DEFAULT_ESTIMATED_DAYS)
    }
}

/// Body of the pincode lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct PincodeLookupResponse {
    #[serde(default)]
    pub delivery_codes: Option<Vec<DeliveryCode>>,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryCode {
    #[serde(default)]
    pub postal_code: Option<PostalCode>,
}

#[derive(Debug, Deserialize)]
pub struct PostalCode {
    #[serde(default)]
    pub pin: Option<Value>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub cod: Option<String>,
    #[serde(default)]
    pub estimated_delivery_days: Option<Value>,
}

impl PincodeLookupResponse {
    /// First matching record, or `None` when the courier has no canonical
    /// entry for the pincode. A present but unreadable day count is a
    /// decode error.
    pub fn into_record(self) -> CourierResult<Option<ServiceabilityRecord>> {
        let Some(info) = self
            .delivery_codes
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|code| code.postal_code)
        else {
            return Ok(None);
        };
        let Some(pin) = info.pin.as_ref().and_then(canonical_pin) else {
            return Ok(None);
        };

        Ok(Some(ServiceabilityRecord {
            pin,
            district: info.district.unwrap_or_default(),
            state_code: info.state_code.unwrap_or_default(),
            cod_available: info.cod.as_deref() == Some("Y"),
            estimated_days: parse_days("estimated_delivery_days", info.estimated_delivery_days.as_ref())?,
        }))
    }
}

/// Request body of the transit time endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitRequest {
    pub pickup_pincode: String,
    pub delivery_pincode: String,
    pub shipment_mode: ShipmentMode,
}

/// Body of the transit time endpoint.
#[derive(Debug, Deserialize)]
pub struct TransitResponse {
    #[serde(default)]
    pub estimated_days: Option<Value>,
}

/// Transit estimate for one shipment mode. `estimated_days` is `None` only
/// when the courier left it out or sent `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitEstimate {
    pub estimated_days: Option<u32>,
}

impl TransitResponse {
    pub fn into_estimate(self) -> CourierResult<TransitEstimate> {
        Ok(TransitEstimate {
            estimated_days: parse_days("estimated_days", self.estimated_days.as_ref())?,
        })
    }
}

/// Upstream sends `pin` as a number or a string; zero and empty mean absent.
fn canonical_pin(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_u64().filter(|n| *n != 0).map(|n| n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Absent and `null` are `Ok(None)`; anything present must be a
/// non-negative integer or a numeric string.
fn parse_days(field: &str, value: Option<&Value>) -> CourierResult<Option<u32>> {
    let days = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    };
    days.map(Some)
        .ok_or_else(|| CourierError::Decode(format!("{} is not a day count: {}", field, value.unwrap_or(&Value::Null))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup(body: Value) -> Option<ServiceabilityRecord> {
        serde_json::from_value::<PincodeLookupResponse>(body)
            .unwrap()
            .into_record()
            .unwrap()
    }

    fn transit(body: Value) -> CourierResult<TransitEstimate> {
        serde_json::from_value::<TransitResponse>(body)
            .unwrap()
            .into_estimate()
    }

    #[test]
    fn test_record_from_lookup() {
        let record = lookup(json!({
            "delivery_codes": [{
                "postal_code": {
                    "pin": 226002,
                    "district": "Lucknow",
                    "state_code": "UP",
                    "cod": "Y",
                    "estimated_delivery_days": 3
                }
            }]
        }))
        .unwrap();

        assert_eq!(record.pin, "226002");
        assert_eq!(record.district, "Lucknow");
        assert_eq!(record.state_code, "UP");
        assert!(record.cod_available);
        assert_eq!(record.estimated_days_or_default(), 3);
    }

    #[test]
    fn test_empty_delivery_codes_is_not_serviceable() {
        assert!(lookup(json!({ "delivery_codes": [] })).is_none());
        assert!(lookup(json!({})).is_none());
    }

    #[test]
    fn test_null_delivery_codes_is_not_serviceable() {
        assert!(lookup(json!({ "delivery_codes": null })).is_none());
    }

    #[test]
    fn test_unreadable_lookup_days_is_decode_error() {
        let result = serde_json::from_value::<PincodeLookupResponse>(json!({
            "delivery_codes": [{ "postal_code": { "pin": 110001, "estimated_delivery_days": "soon" } }]
        }))
        .unwrap()
        .into_record();
        assert!(matches!(result, Err(CourierError::Decode(_))));
    }

    #[test]
    fn test_missing_or_blank_pin_is_not_serviceable() {
        assert!(lookup(json!({ "delivery_codes": [{ "postal_code": { "district": "X" } }] })).is_none());
        assert!(lookup(json!({ "delivery_codes": [{ "postal_code": { "pin": "" } }] })).is_none());
        assert!(lookup(json!({ "delivery_codes": [{ "postal_code": { "pin": 0 } }] })).is_none());
        assert!(lookup(json!({ "delivery_codes": [{}] })).is_none());
    }

    #[test]
    fn test_cod_only_for_explicit_yes() {
        let record = lookup(json!({
            "delivery_codes": [{ "postal_code": { "pin": "110001", "cod": "N" } }]
        }))
        .unwrap();
        assert!(!record.cod_available);
        assert_eq!(record.estimated_days_or_default(), DEFAULT_ESTIMATED_DAYS);
    }

    #[test]
    fn test_transit_request_wire_shape() {
        let request = TransitRequest {
            pickup_pincode: "226002".into(),
            delivery_pincode: "110001".into(),
            shipment_mode: ShipmentMode::Air,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "pickup_pincode": "226002",
                "delivery_pincode": "110001",
                "shipment_mode": "Air"
            })
        );
    }

    #[test]
    fn test_transit_days_accepts_numeric_strings() {
        assert_eq!(transit(json!({ "estimated_days": "4" })).unwrap().estimated_days, Some(4));
        assert_eq!(transit(json!({ "estimated_days": 3 })).unwrap().estimated_days, Some(3));
    }

    #[test]
    fn test_transit_days_absent_or_null() {
        assert_eq!(transit(json!({})).unwrap().estimated_days, None);
        assert_eq!(transit(json!({ "estimated_days": null })).unwrap().estimated_days, None);
    }

    #[test]
    fn test_transit_days_unreadable_is_decode_error() {
        for days in [json!("garbage"), json!(-1), json!(3.5), json!(true), json!([2])] {
            assert!(
                matches!(transit(json!({ "estimated_days": days })), Err(CourierError::Decode(_))),
                "{days} should not parse"
            );
        }
    }

    #[test]
    fn test_fallback_days_are_air_faster() {
        assert_eq!(ShipmentMode::Surface.fallback_days(), 5);
        assert_eq!(ShipmentMode::Air.fallback_days(), 2);
    }
}
