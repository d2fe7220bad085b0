use reqwest::{Client, redirect};
use tokio::sync::OnceCell;

use crate::error::Error;

static SHARED_CLIENT: OnceCell<Client> = OnceCell::const_new();

/// Builds an HTTP client that reports every response as received.
///
/// Redirects are never followed, so a check issues exactly one request and a
/// 3xx answer is judged as such. The client carries no timeout of its own:
/// every caller bounds its requests explicitly.
///
/// # Errors
///
/// Fails when the TLS backend cannot be initialized.
pub fn build_client() -> Result<Client, Error> {
    Ok(Client::builder().redirect(redirect::Policy::none()).build()?)
}

/// Returns the process-wide HTTP client, building it on first use.
///
/// Concurrent first callers wait for a single build; a failed build is not
/// cached and the next caller retries. Clones share the same connection pool.
///
/// # Errors
///
/// Fails when the TLS backend cannot be initialized.
pub async fn shared_client() -> Result<Client, Error> {
    SHARED_CLIENT
        .get_or_try_init(|| async { build_client() })
        .await
        .cloned()
}
