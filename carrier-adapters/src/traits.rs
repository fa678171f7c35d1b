//! Shared carrier source trait and error type.

use std::sync::Arc;

use async_trait::async_trait;
use carrier_primitives::{CarrierRecord, UsdotNumber};
use thiserror::Error;

/// Result alias used by carrier sources.
pub type SourceResult<T> = Result<T, SourceError>;

/// Error type shared by carrier source implementations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source is misconfigured or missing credentials.
    #[error("source not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// Transport-level failures (network, timeout, protocol).
    #[error("source transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider rejected the API key.
    #[error("unauthorized (401): invalid or expired API key")]
    Unauthorized,

    /// The provider has no snapshot for the identifier.
    #[error("no carrier snapshot found for USDOT {usdot}")]
    NotFound {
        /// Identifier that was requested.
        usdot: UsdotNumber,
    },

    /// The provider returned a non-success status or a malformed payload.
    #[error("source response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl SourceError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Retrieves carrier snapshot records by USDOT number.
///
/// Implementations own retries, timeouts, and cancellation; callers invoke
/// [`CarrierSource::fetch`] at most once per verification.
#[async_trait]
pub trait CarrierSource: Send + Sync {
    /// Returns a short provider label used in logs (e.g. `saferweb`).
    fn provider(&self) -> &'static str;

    /// Fetches the current snapshot for the supplied carrier.
    async fn fetch(&self, usdot: UsdotNumber) -> SourceResult<CarrierRecord>;
}

#[async_trait]
impl<S> CarrierSource for Arc<S>
where
    S: CarrierSource + ?Sized,
{
    fn provider(&self) -> &'static str {
        (**self).provider()
    }

    async fn fetch(&self, usdot: UsdotNumber) -> SourceResult<CarrierRecord> {
        (**self).fetch(usdot).await
    }
}
