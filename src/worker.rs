use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use log::{error, info, warn};
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::batch::{self, BatchSummary};
use crate::config::{AlertOptions, Config};
use crate::error::Error;
use crate::model::Target;
use crate::notifier::{AlertMessage, AlertSender, MailApiSender};
use crate::prober::Prober;
use crate::reporter::AlertPayload;
use crate::transport;

/// Runs one probing cycle from the configuration file at `path`.
///
/// # Behavior
///
/// - Loads the target list and settings; failing to do so fails the invocation
/// - Checks every configured website concurrently
/// - Logs the status of each site (UP/DOWN)
/// - Sends one aggregated alert when at least one site is down (if configured)
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the HTTP client
/// cannot be built, or `token` is cancelled before every check has finished.
/// Alert delivery failures are logged and never reported here.
pub async fn run_invocation(
    path: &Path,
    token: &CancellationToken,
) -> Result<BatchSummary, Error> {
    let config = Config::load(path)?;

    info!("Loaded configuration from {}", path.display());
    info!("Timeout: {} ms", config.probe.timeout_ms);
    log_alert_settings(&config.alert);

    let client = transport::shared_client().await?;
    let prober = Prober::new(client.clone(), config.probe.timeout())
        .with_user_agent(config.probe.user_agent.as_str());
    let sender = MailApiSender::from_options(client, &config.alert)?;

    select! {
        summary = run_checks(&config.websites, &prober, &config.alert, sender.as_ref()) => Ok(summary),
        () = token.cancelled() => {
            warn!("Shutdown requested, abandoning in-flight checks");
            Err(Error::Interrupted)
        }
    }
}

/// Checks `targets`, alerts on failures and summarizes the cycle.
pub async fn run_checks<S: AlertSender>(
    targets: &[Target],
    prober: &Prober,
    alert: &AlertOptions,
    sender: Option<&S>,
) -> BatchSummary {
    let started = Instant::now();

    if targets.is_empty() {
        warn!("No websites configured");
        return BatchSummary::new(Vec::new(), started.elapsed());
    }

    info!("Checking {} websites", targets.len());
    let results = batch::check_all(prober, targets).await;

    for result in &results {
        if result.success {
            info!("{} ({}): UP - status {}", result.name, result.url, result.status_code);
        } else {
            match &result.error {
                Some(e) => warn!("{} ({}): DOWN - {e}", result.name, result.url),
                None => warn!(
                    "{} ({}): DOWN - status {}",
                    result.name, result.url, result.status_code
                ),
            }
        }
    }

    let failures = batch::failures(&results);
    if !failures.is_empty() {
        let payload = AlertPayload::new(&failures, Utc::now());
        deliver_alert(payload, alert, sender).await;
    }

    let summary = BatchSummary::new(results, started.elapsed());
    info!(
        "Website check completed in {} ms: {} checked, {} up, {} down",
        summary.duration_ms, summary.checked, summary.successful, summary.failed
    );
    summary
}

async fn deliver_alert<S: AlertSender>(
    payload: AlertPayload,
    alert: &AlertOptions,
    sender: Option<&S>,
) {
    let Some((from, to)) = alert.addresses() else {
        warn!("Alert addresses not configured, set ALERT_EMAIL_FROM and ALERT_EMAIL_TO");
        return;
    };
    let Some(sender) = sender else {
        warn!("Alert endpoint not configured, set ALERT_ENDPOINT");
        return;
    };

    let message = AlertMessage::new(from, to, payload);
    match sender.send(&message).await {
        Ok(()) => info!("Alert sent to {to}"),
        Err(e) => error!("Failed to send alert: {e}"),
    }
}

fn log_alert_settings(alert: &AlertOptions) {
    match (alert.addresses().is_some(), alert.endpoint.is_some()) {
        (true, true) => info!("Alerting is set, a notification will be sent on failure"),
        (true, false) => warn!("Alert endpoint is not set, no notifications will be sent"),
        (false, _) => warn!("Alert addresses are not set, no notifications will be sent"),
    }
}
