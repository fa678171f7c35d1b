//! Configuration management for carrier verification.
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file in the working directory.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigResult};
pub use schema::VerifierConfig;
