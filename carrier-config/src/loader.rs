//! Environment-backed configuration loader.

use std::path::PathBuf;
use std::time::Duration;

use carrier_primitives::UsdotNumber;
use thiserror::Error;
use tracing::debug;

use crate::schema::{
    DEFAULT_API_BASE_URL, DEFAULT_TEST_USDOT, DEFAULT_TIMEOUT_SECS, VerifierConfig,
};

/// Variable holding the SaferWebAPI key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Variable overriding the snapshot endpoint.
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
/// Variable naming the default carrier.
pub const TEST_USDOT_VAR: &str = "TEST_USDOT";
/// Variable overriding the request timeout, in seconds.
pub const API_TIMEOUT_VAR: &str = "API_TIMEOUT_SECS";

const PLACEHOLDER_API_KEY: &str = "YourApiKey";

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{name} not set; copy .env.example to .env and fill it in")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// The API key still holds the template placeholder.
    #[error("API_KEY still contains the placeholder value")]
    PlaceholderApiKey,
    /// A variable holds a value that cannot be used.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Human-readable reason for rejection.
        reason: String,
    },
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Loads `.env` from the working directory (or a parent) into the process
/// environment. Variables already set are left untouched.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(err) => {
            debug!(error = %err, "no .env file loaded");
            None
        }
    }
}

impl VerifierConfig {
    /// Loads `.env`, then reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or a value is invalid.
    pub fn from_env() -> ConfigResult<Self> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR).ok_or(ConfigError::Missing { name: API_KEY_VAR })?;
        if api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }

        let api_base_url = read(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: API_BASE_URL_VAR,
                reason: "must start with http:// or https://".into(),
            });
        }

        let test_usdot = match read(TEST_USDOT_VAR) {
            Some(value) => value.parse::<UsdotNumber>().map_err(|err| ConfigError::Invalid {
                name: TEST_USDOT_VAR,
                reason: err.to_string(),
            })?,
            None => UsdotNumber::new(DEFAULT_TEST_USDOT).map_err(|err| ConfigError::Invalid {
                name: TEST_USDOT_VAR,
                reason: err.to_string(),
            })?,
        };

        let timeout_secs = match read(API_TIMEOUT_VAR) {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: API_TIMEOUT_VAR,
                    reason: format!("expected a positive number of seconds, got `{value}`"),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_base_url,
            test_usdot,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
