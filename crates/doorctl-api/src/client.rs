// Service HTTP client
//
// Wraps `reqwest::Client` with base-URL endpoint construction, form and
// query encoding, status checking and JSON decoding. Endpoint modules
// (auth, gateways, devices) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Base URL of the public service.
pub const DEFAULT_BASE_URL: &str = "https://www.myliftmaster.com/";

/// Form/query parameters, in the order they are sent.
pub type Params<'a> = [(&'a str, &'a str)];

/// Parameter names whose values never reach the diagnostic log.
const REDACTED_PARAMS: &[&str] = &["Password"];

/// Raw HTTP client for the garage door web service.
///
/// Holds the cookie-bearing `reqwest::Client` and the base URL every
/// endpoint path is joined onto. All requests are issued one at a time
/// by the owning session.
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ServiceClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (login state lives in the session cookie).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// The service base URL (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an endpoint path relative to the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET `url` with `params` as the query string and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &Params<'_>,
    ) -> Result<T, Error> {
        let mut url = url;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        let shown = url.to_string();
        debug!(method = "GET", url = %shown, "sending request");

        let started = Instant::now();
        let resp = self.http.get(url).send().await.map_err(|e| {
            debug!(method = "GET", url = %shown, error = %e, "request failed");
            Error::Connect(e)
        })?;
        let resp = check_status("GET", &shown, resp, started)?;
        read_json(resp, &shown).await
    }

    /// POST `params` as an url-encoded form and hand back the raw response.
    ///
    /// The status has already been checked; the body is untouched. Dropping
    /// the returned response releases the connection.
    pub async fn post_form(
        &self,
        url: Url,
        params: &Params<'_>,
    ) -> Result<reqwest::Response, Error> {
        let shown = describe(&url, params);
        debug!(method = "POST", url = %shown, "sending request");

        let started = Instant::now();
        let resp = self
            .http
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                debug!(method = "POST", url = %shown, error = %e, "request failed");
                Error::Connect(e)
            })?;
        check_status("POST", &shown, resp, started)
    }

    /// POST a form and decode the JSON response body.
    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &Params<'_>,
    ) -> Result<T, Error> {
        let shown = describe(&url, params);
        let resp = self.post_form(url, params).await?;
        read_json(resp, &shown).await
    }

    /// POST a form and discard whatever the service sends back.
    pub async fn post_form_discard(&self, url: Url, params: &Params<'_>) -> Result<(), Error> {
        let resp = self.post_form(url, params).await?;
        drop(resp);
        Ok(())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Ensure the base URL ends in `/` so relative joins append instead of replace.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Read the whole body and decode it as JSON.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response, shown: &str) -> Result<T, Error> {
    let body = resp.text().await.map_err(|e| {
        debug!(url = %shown, error = %e, "failed to read response body");
        Error::BodyRead(e)
    })?;
    decode(&body)
}

/// Render `url` with `params` appended as a query string, for the log only.
fn describe(url: &Url, params: &Params<'_>) -> String {
    let mut shown = url.clone();
    if !params.is_empty() {
        let mut pairs = shown.query_pairs_mut();
        for (key, value) in params {
            if REDACTED_PARAMS.contains(key) {
                pairs.append_pair(key, "***");
            } else {
                pairs.append_pair(key, value);
            }
        }
    }
    shown.to_string()
}

fn check_status(
    method: &str,
    shown: &str,
    resp: reqwest::Response,
    started: Instant,
) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(method, url = %shown, status = status.as_u16(), elapsed_ms, "response received");

    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_owned(),
            url: shown.to_owned(),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
