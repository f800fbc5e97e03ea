//! # API Configuration
//!
//! Base URL and timeouts for the catalog client.

use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Public catalog used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1";

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog client configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use shopfront_api::ApiConfig;
///
/// let config = ApiConfig::new("http://localhost:3000/api/v1")
///     .unwrap()
///     .timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url.as_str(), "http://localhost:3000/api/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Root every endpoint path is appended to.
    pub base_url: Url,

    /// Whole-request timeout.
    /// Default: 10 seconds
    pub timeout: Duration,

    /// TCP connect timeout.
    /// Default: 5 seconds
    pub connect_timeout: Duration,
}

impl ApiConfig {
    /// Parses `base_url` and applies default timeouts.
    ///
    /// Only `http` and `https` URLs that can carry a path are accepted.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: expected an http(s) URL"
            )));
        }

        Ok(ApiConfig {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: Duration::from_secs(5),
        })
    }

    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
