use std::error::Error as StdError;
use std::fmt::Write;
use std::time::Duration;

use log::debug;
use reqwest::{Client, header};
use tokio::time;
use url::Url;

use crate::model::{CheckOutcome, Target};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_USER_AGENT: &str = "Website-Checker/1.0";
pub const TIMEOUT_ERROR: &str = "Request timeout";

/// Performs single availability checks against one target at a time.
///
/// The HTTP client is injected so that every check in a process can share one
/// connection pool. Cloning a `Prober` is cheap.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    timeout: Duration,
    user_agent: String,
}

impl Prober {
    #[must_use]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks whether `target` answers a GET with HTTP 200.
    ///
    /// Every failure mode is reported through the returned outcome: a malformed
    /// URL, a transport error or the timeout firing all yield status code `0`
    /// together with an error description.
    pub async fn check(&self, target: &Target) -> CheckOutcome {
        let url = match parse_target_url(&target.url) {
            Ok(url) => url,
            Err(reason) => {
                debug!("{}: rejected URL {}: {reason}", target.name, target.url);
                return CheckOutcome::unreachable(target, reason);
            }
        };

        // Dropping the request future on expiry aborts the connection.
        match time::timeout(self.timeout, self.fetch_status(url)).await {
            Ok(Ok(status)) => CheckOutcome::responded(target, status),
            Ok(Err(e)) if e.is_timeout() => CheckOutcome::unreachable(target, TIMEOUT_ERROR),
            Ok(Err(e)) => CheckOutcome::unreachable(target, describe(&e)),
            Err(_) => CheckOutcome::unreachable(target, TIMEOUT_ERROR),
        }
    }

    async fn fetch_status(&self, url: Url) -> Result<u16, reqwest::Error> {
        let mut response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;
        let status = response.status().as_u16();

        // Only the status matters, the body is read to completion and dropped
        while response.chunk().await?.is_some() {}

        Ok(status)
    }
}

fn parse_target_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("Invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("Unsupported URL scheme: {other}")),
    }
}

/// Renders an error together with its chain of sources.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            let _ = write!(description, ": {cause_text}");
        }
        source = cause.source();
    }
    description
}
