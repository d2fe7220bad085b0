use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::CheckOutcome;

/// Subject and body of an alert about failing websites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPayload {
    pub subject: String,
    pub body: String,
}

impl AlertPayload {
    #[must_use]
    pub fn new(failures: &[CheckOutcome], now: DateTime<Utc>) -> Self {
        Self {
            subject: alert_subject(failures.len()),
            body: format_alert_body(failures, now),
        }
    }
}

#[must_use]
pub fn alert_subject(failure_count: usize) -> String {
    format!("Website Alert: {failure_count} site(s) down")
}

/// Formats failed checks into a plain text alert body.
///
/// The output depends only on `failures` and `now`.
#[must_use]
pub fn format_alert_body(failures: &[CheckOutcome], now: DateTime<Utc>) -> String {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut body = String::from("Website Availability Alert\n");
    let _ = writeln!(body, "Timestamp: {timestamp}");
    body.push('\n');
    body.push_str("The following websites are not responding with a 200 status:\n\n");

    for (index, check) in failures.iter().enumerate() {
        let _ = writeln!(body, "{}. {}", index + 1, check.name);
        let _ = writeln!(body, "   URL: {}", check.url);
        if check.status_code == 0 {
            body.push_str("   Status Code: N/A\n");
        } else {
            let _ = writeln!(body, "   Status Code: {}", check.status_code);
        }
        if let Some(error) = &check.error {
            let _ = writeln!(body, "   Error: {error}");
        }
        body.push('\n');
    }

    body.push_str("\nThis is an automated alert from the Website-Checker.\n");
    body
}
