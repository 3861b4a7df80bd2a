use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use strum_macros::AsRefStr;

use crate::web::data::EmailAddress;

#[derive(Debug, AsRefStr)]
pub enum MessageStream {
    #[strum(serialize = "broadcast")]
    Broadcast,
    #[strum(serialize = "outbound")]
    Outbound,
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub sender: EmailAddress,
    auth_token: SecretString,
}

impl EmailClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        sender: EmailAddress,
        auth_token: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(EmailClient {
            http_client,
            url,
            sender,
            auth_token,
        })
    }

    /// Sends one plain-text email. The send is awaited to completion and any
    /// non-2xx status from the delivery service is propagated as an error.
    pub async fn send_email<S>(
        &self,
        recepient: &EmailAddress,
        subject: S,
        text_content: S,
        message_stream: MessageStream,
    ) -> Result<()>
    where
        S: AsRef<str>,
    {
        let url = self
            .url
            .join("email")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let email_content = EmailContent {
            from: self.sender.as_ref(),
            to: recepient.as_ref(),
            subject: subject.as_ref(),
            text_body: text_content.as_ref(),
            message_stream: message_stream.as_ref(),
        };

        let _resp = self
            .http_client
            .post(url)
            .header("X-Postmark-Server-Token", self.auth_token.expose_secret())
            .json(&email_content)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailContent<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub text_body: &'a str,
    pub message_stream: &'a str,
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
