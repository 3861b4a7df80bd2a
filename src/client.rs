//! The browser-side counterpart of the registration endpoint, for programs that
//! want to register users against a running service.

use reqwest::Client;
use serde::Serialize;
use tracing::warn;

/// Returned verbatim when the service response carries no usable message.
const FALLBACK_SUCCESS_MSG: &str = "Successfully registered!";
/// Returned verbatim on any transport failure.
const FALLBACK_ERROR_MSG: &str = "Something went wrong. Please try again.";

#[derive(Debug)]
pub struct RegistrationClient {
    http_client: Client,
    base_url: reqwest::Url,
}

impl RegistrationClient {
    pub fn new<S: AsRef<str>>(base_url: S, timeout: std::time::Duration) -> Result<Self> {
        let base_url =
            reqwest::Url::parse(base_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(RegistrationClient {
            http_client,
            base_url,
        })
    }

    /// Registers `email` with the service and maps the outcome to a user-facing
    /// string. This function is total: it never fails, a transport error is
    /// logged and collapsed into a generic apology. No retry, no backoff.
    ///
    /// The service's own `message` is surfaced whenever the response body
    /// carries one, for error statuses too, so a 400 reads back as
    /// "Email is required" rather than a fake success.
    pub async fn register_user(&self, email: &str) -> String {
        match self.post_registration(email).await {
            Ok(message) => message,
            Err(er) => {
                warn!("Error submitting email: {er}");
                FALLBACK_ERROR_MSG.to_string()
            }
        }
    }

    async fn post_registration(&self, email: &str) -> Result<String> {
        let url = self
            .base_url
            .join("register")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let resp = self
            .http_client
            .post(url)
            .json(&RegistrationBody { email })
            .send()
            .await?;

        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str().map(str::to_string))
            });

        Ok(message.unwrap_or_else(|| FALLBACK_SUCCESS_MSG.to_string()))
    }
}

#[derive(Serialize)]
struct RegistrationBody<'a> {
    email: &'a str,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
