use std::time::Duration;

use log::error;
use serde::Serialize;
use tokio::task::JoinSet;

use crate::model::{CheckOutcome, Target};
use crate::prober::Prober;

pub const COMPLETED_MESSAGE: &str = "Website check completed";
pub const EMPTY_MESSAGE: &str = "No websites to check";
pub const ABORTED_ERROR: &str = "Check task aborted";

/// Probes every target concurrently and returns the outcomes in input order.
///
/// Each check runs on its own task and writes into the slot matching its
/// position in `targets`, so completion order never leaks into the result.
/// The call returns only once every slot is filled.
pub async fn check_all(prober: &Prober, targets: &[Target]) -> Vec<CheckOutcome> {
    if targets.is_empty() {
        return Vec::new();
    }

    let mut checks = JoinSet::new();
    for (index, target) in targets.iter().cloned().enumerate() {
        let prober = prober.clone();
        checks.spawn(async move { (index, prober.check(&target).await) });
    }

    join_in_order(checks, targets).await
}

/// Drains `checks` into one slot per target.
///
/// A task that ends without producing an outcome still fills its slot with a
/// failure, so the result always has one entry per target.
async fn join_in_order(
    mut checks: JoinSet<(usize, CheckOutcome)>,
    targets: &[Target],
) -> Vec<CheckOutcome> {
    let mut slots: Vec<Option<CheckOutcome>> = vec![None; targets.len()];

    while let Some(joined) = checks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(e) => error!("Check task ended abnormally: {e}"),
        }
    }

    slots
        .into_iter()
        .zip(targets)
        .map(|(slot, target)| {
            slot.unwrap_or_else(|| CheckOutcome::unreachable(target, ABORTED_ERROR))
        })
        .collect()
}

/// Failed outcomes, keeping their relative order.
#[must_use]
pub fn failures(outcomes: &[CheckOutcome]) -> Vec<CheckOutcome> {
    outcomes.iter().filter(|o| !o.success).cloned().collect()
}

/// Aggregate result of one probing cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub message: String,
    pub checked: usize,
    pub successful: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<CheckOutcome>,
}

impl BatchSummary {
    #[must_use]
    pub fn new(results: Vec<CheckOutcome>, duration: Duration) -> Self {
        let successful = results.iter().filter(|o| o.success).count();
        let message = if results.is_empty() {
            EMPTY_MESSAGE
        } else {
            COMPLETED_MESSAGE
        };

        Self {
            message: message.to_string(),
            checked: results.len(),
            successful,
            failed: results.len() - successful,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            results,
        }
    }
}
