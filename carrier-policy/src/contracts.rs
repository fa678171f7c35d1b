//! Verification request contract.

use carrier_primitives::UsdotNumber;
use serde::{Deserialize, Serialize};

/// Request to verify one carrier, optionally cross-checking a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    usdot: UsdotNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl VerificationRequest {
    /// Creates a request without identity verification.
    #[must_use]
    pub fn new(usdot: UsdotNumber) -> Self {
        Self { usdot, phone: None }
    }

    /// Adds the phone number the carrier claims as its own.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns the carrier identifier.
    #[must_use]
    pub const fn usdot(&self) -> UsdotNumber {
        self.usdot
    }

    /// Returns the claimed phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}
