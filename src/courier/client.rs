//! Delhivery HTTP client.
//!
//! # Responsibilities
//! - Query pincode serviceability
//! - Query transit time per shipment mode
//! - Map transport, status and decode failures into `CourierError`
//!
//! One pooled `reqwest::Client` is shared by every call; the per-call
//! timeout is set on the client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::config::CourierConfig;
use crate::courier::types::{
    CourierError, CourierResult, PincodeLookupResponse, ServiceabilityRecord, TransitEstimate,
    TransitRequest, TransitResponse,
};
use crate::delivery::Pincode;
use crate::observability::metrics;

/// Upstream courier operations used by the delivery check.
#[async_trait]
pub trait CourierApi: Send + Sync {
    /// Look up a destination pincode. `Ok(None)` means not serviceable.
    async fn lookup_pincode(
        &self,
        token: &str,
        pincode: &Pincode,
    ) -> CourierResult<Option<ServiceabilityRecord>>;

    /// Estimate transit time for one shipment mode.
    async fn transit_estimate(
        &self,
        token: &str,
        request: &TransitRequest,
    ) -> CourierResult<TransitEstimate>;
}

#[derive(Clone)]
pub struct DelhiveryClient {
    http: reqwest::Client,
    pincode_url: String,
    transit_url: String,
    timeout: Duration,
}

impl DelhiveryClient {
    pub fn new(config: &CourierConfig) -> CourierResult<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pincode-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CourierError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            pincode_url: config.pincode_url.clone(),
            transit_url: config.transit_url.clone(),
            timeout,
        })
    }
}

impl std::fmt::Debug for DelhiveryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelhiveryClient")
            .field("pincode_url", &self.pincode_url)
            .field("transit_url", &self.transit_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn check_status(response: reqwest::Response) -> CourierResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CourierError::Status(status.as_u16()))
    }
}

fn token_header(token: &str) -> String {
    format!("Token {}", token)
}

impl DelhiveryClient {
    async fn fetch_lookup(
        &self,
        token: &str,
        pincode: &Pincode,
    ) -> CourierResult<Option<ServiceabilityRecord>> {
        let response = self
            .http
            .get(&self.pincode_url)
            .query(&[("filter_codes", pincode.as_str())])
            .header(AUTHORIZATION, token_header(token))
            .send()
            .await?;
        let body: PincodeLookupResponse = check_status(response)?.json().await?;
        body.into_record()
    }

    async fn fetch_transit(
        &self,
        token: &str,
        request: &TransitRequest,
    ) -> CourierResult<TransitEstimate> {
        let response = self
            .http
            .post(&self.transit_url)
            .header(AUTHORIZATION, token_header(token))
            .json(request)
            .send()
            .await?;
        let body: TransitResponse = check_status(response)?.json().await?;
        body.into_estimate()
    }
}

#[async_trait]
impl CourierApi for DelhiveryClient {
    async fn lookup_pincode(
        &self,
        token: &str,
        pincode: &Pincode,
    ) -> CourierResult<Option<ServiceabilityRecord>> {
        let started = Instant::now();
        let result = self.fetch_lookup(token, pincode).await;
        metrics::record_upstream_call("pincode", result.is_ok(), started);
        result
    }

    async fn transit_estimate(
        &self,
        token: &str,
        request: &TransitRequest,
    ) -> CourierResult<TransitEstimate> {
        let started = Instant::now();
        let result = self.fetch_transit(token, request).await;
        metrics::record_upstream_call(request.shipment_mode.as_str(), result.is_ok(), started);
        result
    }
}
