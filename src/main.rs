use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, warn};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use website_checker::{Config, worker};

#[derive(Serialize)]
struct FailedInvocation {
    message: &'static str,
    error: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C");
            shutdown.cancel();
        }
    });

    let path = match std::env::args_os().nth(1) {
        Some(arg) => Ok(PathBuf::from(arg)),
        None => Config::default_path(),
    };

    let outcome = match path {
        Ok(path) => worker::run_invocation(&path, &token).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to serialize results: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Error checking websites: {e}");
            let failure = FailedInvocation {
                message: "Error checking websites",
                error: e.to_string(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&failure) {
                println!("{json}");
            }
            ExitCode::FAILURE
        }
    }
}
