//! Motor-carrier verification SDK facade.
//!
//! Bundles the workspace crates behind feature flags so downstream users can
//! pull in only the decision engine, or the full stack with the SaferWebAPI
//! client, configuration loader, and logging setup.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use carrier_primitives as primitives;

/// Carrier data sources (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use carrier_adapters as adapters;

/// Rule evaluation and decision engine (enabled by `policy` feature).
#[cfg(feature = "policy")]
pub use carrier_policy as policy;

/// Configuration management (enabled by `config` feature).
#[cfg(feature = "config")]
pub use carrier_config as config;

/// Logging setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use carrier_telemetry as telemetry;
