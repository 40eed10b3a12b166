// Authentication
//
// Cookie-based session login. The login endpoint sets a session cookie
// in the client's jar; subsequent requests use that cookie automatically.
// Nothing is read from the response body.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::Error;

/// Caller-visible message for every login failure.
pub const LOGIN_FAILED: &str = "Login failed";

impl ServiceClient {
    /// Authenticate with the service using email/password.
    ///
    /// `POST {base}` with form fields `Email` and `Password`. Any failure
    /// (connect, non-success status) is reported as
    /// [`Error::Authentication`] with a generic message; the underlying
    /// cause is only logged.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.base_url().clone();
        debug!(%url, "logging in");

        let params = [("Email", username), ("Password", password.expose_secret())];
        match self.post_form_discard(url, &params).await {
            Ok(()) => {
                debug!("login successful");
                Ok(())
            }
            Err(cause) => {
                debug!(error = %cause, "login request failed");
                Err(Error::Authentication {
                    message: LOGIN_FAILED.into(),
                })
            }
        }
    }
}
