use std::future::Future;

use tokio::time::{self, Duration};
use tracing::{error, warn};

use crate::error::Result;

/// Runs `f`, retrying up to `retries` more times after a failure.
/// Returns the last error once every attempt has failed.
pub async fn run_with_retry<F, Fut, T>(retries: u32, delay: Duration, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!(error = %e, attempt, retries, "Run failed, retrying");
                time::sleep(delay).await;
            }
            Err(e) => {
                error!(error = %e, "Run failed, giving up");
                return Err(e);
            }
        }
    }
}
