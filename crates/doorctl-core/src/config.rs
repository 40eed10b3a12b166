// ── Runtime session configuration ──
//
// These types describe *where* and *how* to talk to the service.
// They never touch disk: the CLI builds a `SessionConfig` and hands it in.

use std::time::Duration;

use url::Url;

use doorctl_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::error::CoreError;

/// Default `culture` query parameter for the device list.
pub const DEFAULT_CULTURE: &str = "en-US";

/// Default `brandName` query parameter for the device list.
pub const DEFAULT_BRAND: &str = "LiftMaster";

/// Configuration for one session.
///
/// Fixed for the lifetime of a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Service base URL (e.g., `https://www.myliftmaster.com/`).
    pub base_url: Url,
    /// Value sent as `culture` on device list requests.
    pub culture: String,
    /// Value sent as `brandName` on device list requests.
    pub brand: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SessionConfig {
    /// Parse `base_url` and build a config with default culture, brand and timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self, CoreError> {
        let base_url = base_url.parse().map_err(|e| CoreError::Config {
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            culture: DEFAULT_CULTURE.into(),
            brand: DEFAULT_BRAND.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
