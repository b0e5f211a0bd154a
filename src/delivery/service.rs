//! The delivery check: validate, look up, estimate, assemble.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::config::{ChargeConfig, MissingEstimatePolicy, RelayConfig};
use crate::courier::{CourierApi, CourierError, ServiceabilityRecord, ShipmentMode, TransitRequest};
use crate::delivery::eta::{compute_eta, Clock};
use crate::delivery::pincode::Pincode;
use crate::delivery::types::{DeliveryCheck, DeliveryError, DeliveryQuote, ModeEstimate};

/// Answers whether a pincode is serviceable and when a parcel would arrive.
///
/// Everything it needs is injected at construction; nothing is read from the
/// environment while handling a request.
pub struct DeliveryService {
    courier: Arc<dyn CourierApi>,
    clock: Arc<dyn Clock>,
    token: Option<String>,
    pickup_pincode: String,
    charges: ChargeConfig,
    transit_budget: Duration,
    missing_estimate: MissingEstimatePolicy,
}

impl DeliveryService {
    pub fn new(config: &RelayConfig, courier: Arc<dyn CourierApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courier,
            clock,
            token: config.token().map(str::to_string),
            pickup_pincode: config.courier.pickup_pincode.clone(),
            charges: config.charges.clone(),
            transit_budget: Duration::from_secs(config.courier.transit_budget_secs),
            missing_estimate: config.courier.missing_estimate,
        }
    }

    /// Whether the courier token is present.
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Run a delivery check for a raw pincode string.
    pub async fn check(&self, raw_pincode: &str) -> Result<DeliveryCheck, DeliveryError> {
        let pincode = Pincode::parse(raw_pincode)?;
        let token = self.token.as_deref().ok_or(DeliveryError::Misconfigured)?;

        let record = match self.courier.lookup_pincode(token, &pincode).await? {
            Some(record) => record,
            None => {
                tracing::debug!(pincode = %pincode, "Pincode not serviceable");
                return Ok(DeliveryCheck::not_serviceable());
            }
        };

        tracing::debug!(
            pincode = %pincode,
            district = %record.district,
            lookup_days = record.estimated_days_or_default(),
            "Pincode serviceable, estimating transit"
        );

        let (surface_days, air_days) = self.transit_days(token, &pincode).await?;
        let today = self.clock.today();

        Ok(DeliveryCheck::serviceable(assemble_quote(
            record,
            self.mode_estimate(today, ShipmentMode::Surface, surface_days)?,
            self.mode_estimate(today, ShipmentMode::Air, air_days)?,
        )))
    }

    /// Surface and air estimates, issued concurrently under one budget.
    async fn transit_days(&self, token: &str, pincode: &Pincode) -> Result<(u32, u32), CourierError> {
        let surface = self.estimate_days(token, pincode, ShipmentMode::Surface);
        let air = self.estimate_days(token, pincode, ShipmentMode::Air);

        match tokio::time::timeout(self.transit_budget, async { tokio::try_join!(surface, air) }).await {
            Ok(result) => result,
            Err(_) => Err(CourierError::Timeout),
        }
    }

    async fn estimate_days(
        &self,
        token: &str,
        pincode: &Pincode,
        mode: ShipmentMode,
    ) -> Result<u32, CourierError> {
        let request = TransitRequest {
            pickup_pincode: self.pickup_pincode.clone(),
            delivery_pincode: pincode.to_string(),
            shipment_mode: mode,
        };
        let estimate = self.courier.transit_estimate(token, &request).await?;

        match (estimate.estimated_days, self.missing_estimate) {
            (Some(days), _) => Ok(days),
            (None, MissingEstimatePolicy::Reject) => Err(CourierError::MissingEstimate(mode)),
            (None, MissingEstimatePolicy::Fallback) => {
                let days = mode.fallback_days();
                tracing::warn!(mode = %mode, days, "Courier omitted estimated days, using default");
                Ok(days)
            }
        }
    }

    fn mode_estimate(
        &self,
        today: NaiveDate,
        mode: ShipmentMode,
        days: u32,
    ) -> Result<ModeEstimate, CourierError> {
        let eta = compute_eta(today, days)
            .ok_or_else(|| CourierError::Decode(format!("{} estimate of {} days is out of range", mode, days)))?;
        let extra_charge = match mode {
            ShipmentMode::Surface => self.charges.surface,
            ShipmentMode::Air => self.charges.air,
        };
        Ok(ModeEstimate {
            days,
            eta,
            extra_charge,
        })
    }
}

fn assemble_quote(record: ServiceabilityRecord, surface: ModeEstimate, air: ModeEstimate) -> DeliveryQuote {
    DeliveryQuote {
        cod_available: record.cod_available,
        district: record.district,
        state_code: record.state_code,
        surface,
        air,
    }
}
