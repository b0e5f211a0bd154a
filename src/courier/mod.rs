//! Courier integration subsystem.
//!
//! # Data Flow
//! ```text
//! DeliveryService
//!     → client.rs (CourierApi: pincode lookup, transit estimate)
//!     → Delhivery HTTP API (Authorization: Token <credential>)
//!     → types.rs (wire bodies → ServiceabilityRecord / TransitEstimate)
//! ```
//!
//! # Security Constraints
//! - The API token is passed per call, never stored in the client
//! - Never log the token

pub mod client;
pub mod types;

pub use client::{CourierApi, DelhiveryClient};
pub use types::{
    CourierError, CourierResult, ServiceabilityRecord, ShipmentMode, TransitEstimate,
    TransitRequest, DEFAULT_AIR_DAYS, DEFAULT_ESTIMATED_DAYS, DEFAULT_SURFACE_DAYS,
};
