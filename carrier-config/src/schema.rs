//! Strongly typed configuration schema.

use std::fmt;
use std::time::Duration;

use carrier_primitives::UsdotNumber;

/// Default SaferWebAPI snapshot endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://saferwebapi.com/v2/usdot/snapshot";
/// Default carrier used for smoke runs.
pub const DEFAULT_TEST_USDOT: u64 = 44;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings needed to reach the carrier data source.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    pub(crate) api_key: String,
    pub(crate) api_base_url: String,
    pub(crate) test_usdot: UsdotNumber,
    pub(crate) timeout: Duration,
}

impl fmt::Debug for VerifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierConfig")
            .field("api_key", &self.masked_api_key())
            .field("api_base_url", &self.api_base_url)
            .field("test_usdot", &self.test_usdot)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl VerifierConfig {
    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the snapshot endpoint base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the carrier used when none is given explicitly.
    #[must_use]
    pub const fn test_usdot(&self) -> UsdotNumber {
        self.test_usdot
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the key with only its first and last four characters visible.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "***".to_owned();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
