//! Concurrent website availability checks with aggregated alerting.
//!
//! One invocation loads a list of targets, probes all of them in parallel and
//! sends a single alert describing every site that did not answer with HTTP 200.

pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod notifier;
pub mod prober;
pub mod reporter;
pub mod transport;
pub mod worker;

pub use batch::{BatchSummary, check_all};
pub use config::Config;
pub use error::Error;
pub use model::{CheckOutcome, Target};
pub use notifier::{AlertMessage, AlertSender, MailApiSender};
pub use prober::Prober;
pub use reporter::AlertPayload;
