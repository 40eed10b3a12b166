use thiserror::Error;

/// Top-level error type for the `doorctl-api` crate.
///
/// Every transport call fails with exactly one of these. Nothing is
/// retried; `doorctl-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or the login request itself failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// The request never produced a response (DNS, refused, TLS, timeout).
    #[error("HTTP transport error: {0}")]
    Connect(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP Error: {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    /// The response headers arrived but the body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Commands ────────────────────────────────────────────────────
    /// The service accepted the request but reported an application error.
    #[error("{message}")]
    RemoteCommand { message: String },
}

impl Error {
    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Connect(e) | Self::BodyRead(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The HTTP status, if the service answered with a non-success code.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
