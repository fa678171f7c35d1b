//! SaferWebAPI snapshot client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use carrier_primitives::{CarrierRecord, UsdotNumber};
use hyper::body::to_bytes;
use hyper::header::ACCEPT;
use hyper::{Body, Request, StatusCode, Uri};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::http_client::{HyperClient, build_https_client};
use crate::traits::{CarrierSource, SourceError, SourceResult};

/// Default snapshot endpoint; the USDOT number is appended as a path segment.
pub const DEFAULT_BASE_URL: &str = "https://saferwebapi.com/v2/usdot/snapshot";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the SaferWebAPI client.
#[derive(Clone)]
pub struct SaferWebConfig {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for SaferWebConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaferWebConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for SaferWebConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: format!("{DEFAULT_BASE_URL}/"),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SaferWebConfig {
    /// Creates a configuration with the supplied API key and default endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Supplies an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the snapshot base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> SourceResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the sanitized base URL (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Carrier source backed by the SaferWebAPI snapshot endpoint.
pub struct SaferWebClient {
    client: HyperClient,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl fmt::Debug for SaferWebClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaferWebClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SaferWebClient {
    /// Constructs a client from the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] if the API key is missing or blank.
    pub fn new(config: SaferWebConfig) -> SourceResult<Self> {
        let api_key = config
            .api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SourceError::configuration("SaferWebAPI client requires an API key"))?;

        Ok(Self {
            client: build_https_client(),
            base_url: config.base_url,
            api_key,
            timeout: config.timeout,
        })
    }

    fn endpoint(&self, usdot: UsdotNumber) -> SourceResult<Uri> {
        format!("{}{usdot}", self.base_url)
            .parse::<Uri>()
            .map_err(|err| SourceError::configuration(format!("invalid snapshot endpoint: {err}")))
    }
}

#[async_trait]
impl CarrierSource for SaferWebClient {
    fn provider(&self) -> &'static str {
        "saferweb"
    }

    async fn fetch(&self, usdot: UsdotNumber) -> SourceResult<CarrierRecord> {
        let endpoint = self.endpoint(usdot)?;
        debug!(%usdot, %endpoint, "fetching carrier snapshot");

        let request = Request::get(endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .body(Body::empty())
            .map_err(|err| {
                SourceError::transport(format!("failed to build snapshot request: {err}"))
            })?;

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| SourceError::transport("snapshot request timed out"))?
            .map_err(|err| SourceError::transport(format!("snapshot request failed: {err}")))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            SourceError::transport(format!("failed to read snapshot response: {err}"))
        })?;

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(%usdot, "snapshot API rejected the API key");
                return Err(SourceError::Unauthorized);
            }
            StatusCode::NOT_FOUND => return Err(SourceError::NotFound { usdot }),
            status if !status.is_success() => {
                let reason = String::from_utf8_lossy(&bytes).to_string();
                return Err(SourceError::response(format!(
                    "snapshot API returned {status}: {reason}"
                )));
            }
            _ => {}
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            SourceError::response(format!("failed to decode carrier snapshot: {err}"))
        })
    }
}

fn sanitize_base_url(input: &str) -> SourceResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(SourceError::configuration(
            "snapshot base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| SourceError::configuration(format!("invalid snapshot base URL: {err}")))?;
    Ok(base)
}
