//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DELHIVERY_API_TOKEN from the environment
//!     → RelayConfig (validated, immutable)
//!     → injected into the delivery service and HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The API token never lives in the config file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ChargeConfig, CorsConfig, CourierConfig, ListenerConfig, MissingEstimatePolicy,
    ObservabilityConfig, RelayConfig,
};
