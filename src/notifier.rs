use std::future::Future;

use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::config::AlertOptions;
use crate::error::Error;
use crate::reporter::AlertPayload;

/// An alert ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    #[must_use]
    pub fn new(from: &str, to: &str, payload: AlertPayload) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: payload.subject,
            body: payload.body,
        }
    }
}

/// Delivers alert messages to their recipient.
pub trait AlertSender {
    /// # Errors
    ///
    /// Fails when the underlying transport rejects the message.
    fn send(&self, message: &AlertMessage) -> impl Future<Output = Result<(), Error>> + Send;
}

#[derive(Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Sends alerts as plain text emails through an HTTP mail API.
#[derive(Debug, Clone)]
pub struct MailApiSender {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl MailApiSender {
    #[must_use]
    pub fn new(client: Client, endpoint: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Builds a sender from the alert settings, `None` when no endpoint is set.
    ///
    /// # Errors
    ///
    /// Fails when the configured endpoint is not a URL.
    pub fn from_options(client: Client, options: &AlertOptions) -> Result<Option<Self>, Error> {
        let Some(endpoint) = &options.endpoint else {
            return Ok(None);
        };

        Ok(Some(Self::new(
            client,
            Url::parse(endpoint)?,
            options.api_key.clone(),
        )))
    }
}

impl AlertSender for MailApiSender {
    async fn send(&self, message: &AlertMessage) -> Result<(), Error> {
        let payload = MailRequest {
            from: &message.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            text: &message.body,
        };

        let mut request = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        request.send().await?.error_for_status()?;
        Ok(())
    }
}
