//! Pincode delivery-check relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   Storefront checkout
//!        │  POST /api/check-delivery {"pincode": "226002"}
//!        ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │  http (request id → trace → metrics → CORS → timeout)    │
//!   │        │                                                 │
//!   │        ▼                                                 │
//!   │  delivery::DeliveryService                               │
//!   │        │  validate → lookup ──┬─▶ transit (surface) ─┐   │
//!   │        │                      └─▶ transit (air) ─────┤   │
//!   │        │                          joined, one budget │   │
//!   │        ▼                                             ▼   │
//!   │  courier::DelhiveryClient ◀──────────────────────────┘   │
//!   └────────┼─────────────────────────────────────────────────┘
//!            ▼
//!      Delhivery API
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use pincode_relay::config::load_config;
use pincode_relay::lifecycle::{wait_for_signal, Shutdown};
use pincode_relay::observability::{logging, metrics};
use pincode_relay::HttpServer;

#[derive(Parser)]
#[command(name = "pincode-relay")]
#[command(about = "Delivery-check relay between a storefront and the courier API", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("pincode-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        pickup_pincode = %config.courier.pickup_pincode,
        allowed_origin = %config.cors.allowed_origin,
        missing_estimate = ?config.courier.missing_estimate,
        "Configuration loaded"
    );

    if config.token().is_none() {
        tracing::warn!("DELHIVERY_API_TOKEN is not set; delivery checks will fail with 500");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
