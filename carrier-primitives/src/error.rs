//! Shared error definitions for carrier primitives.

use thiserror::Error;

/// Result alias used throughout the verification workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The provided USDOT number could not be parsed.
    #[error("invalid USDOT number `{input}`: {reason}")]
    InvalidUsdot {
        /// The offending input string.
        input: String,
        /// Human-readable reason for rejection.
        reason: &'static str,
    },
}
