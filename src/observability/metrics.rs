//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by method, status
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_upstream_calls_total` (counter): courier calls by call, outcome
//! - `relay_upstream_duration_seconds` (histogram): courier latency by call

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, started: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// `call` is "pincode", "surface" or "air".
pub fn record_upstream_call(call: &'static str, success: bool, started: Instant) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("relay_upstream_calls_total", "call" => call, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("relay_upstream_duration_seconds", "call" => call)
        .record(started.elapsed().as_secs_f64());
}
