//! Observability utilities for carrier verification.

#![warn(missing_docs, clippy::pedantic)]

pub mod tracing_support;

pub use tracing_support::{TelemetryError, init};
