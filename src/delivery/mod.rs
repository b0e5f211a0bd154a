//! Delivery check subsystem.
//!
//! # Data Flow
//! ```text
//! raw pincode
//!     → pincode.rs (shape validation)
//!     → service.rs (token check, serviceability lookup)
//!     → service.rs (surface + air transit estimates, joined)
//!     → eta.rs (today + days → "Friday, 16 October 2026")
//!     → types.rs (DeliveryCheck)
//! ```
//!
//! # Design Decisions
//! - Not serviceable is a normal result, never an error
//! - Either transit call failing fails the whole check; no partial answers
//! - No retries

pub mod eta;
pub mod pincode;
pub mod service;
pub mod types;

pub use eta::{compute_eta, Clock, FixedClock, SystemClock};
pub use pincode::Pincode;
pub use service::DeliveryService;
pub use types::{DeliveryCheck, DeliveryError, DeliveryQuote, ModeEstimate};
