//! Pincode delivery-check relay library.

pub mod config;
pub mod courier;
pub mod delivery;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use delivery::{DeliveryCheck, DeliveryService};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
