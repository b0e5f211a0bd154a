//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, body limit)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{CorsConfig, RelayConfig};
use crate::courier::{CourierError, DelhiveryClient};
use crate::delivery::{DeliveryService, SystemClock};
use crate::http::handlers::{check_delivery, health};
use crate::http::request::{request_id, UuidRequestId};
use crate::observability::metrics;

pub const CHECK_DELIVERY_PATH: &str = "/api/check-delivery";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DeliveryService>,
}

/// HTTP server for the delivery-check relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server talking to the real courier API.
    pub fn new(config: RelayConfig) -> Result<Self, CourierError> {
        let courier = Arc::new(DelhiveryClient::new(&config.courier)?);
        let service = Arc::new(DeliveryService::new(&config, courier, Arc::new(SystemClock)));
        Ok(Self::with_service(&config, service))
    }

    /// Create a server around an already-built delivery service.
    pub fn with_service(config: &RelayConfig, service: Arc<DeliveryService>) -> Self {
        Self {
            router: build_router(config, service),
        }
    }

    /// Run the server until a shutdown signal is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RelayConfig, service: Arc<DeliveryService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route(CHECK_DELIVERY_PATH, post(check_delivery))
        .route("/health", get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(cors_layer(&config.cors))
        .layer(middleware::from_fn(track_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "request",
                        request_id = %request_id(request),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Only the storefront origin may call, only with POST.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST])
        .allow_headers(Any);

    match HeaderValue::from_str(&config.allowed_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::error!(
                origin = %config.allowed_origin,
                "Invalid CORS origin, cross-origin requests will be refused"
            );
            cors
        }
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), started);
    response
}
