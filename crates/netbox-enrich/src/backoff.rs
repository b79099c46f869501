//! # Fibonacci Backoff
//!
//! Delay schedule for `--wait`: while NetBox is not answering yet, the status
//! check is retried after 1s, 1s, 2s, 3s, 5s, ... capped at a maximum.
//!
//! This only gates startup. Requests made during a lookup are never retried.

use netbox_client::{NetBoxClientTrait, NetBoxError};
use std::time::Duration;
use tracing::{debug, info};

/// Fibonacci backoff calculator
///
/// Each delay is the sum of the previous two, starting from `min_secs` twice.
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    /// Previous backoff value in seconds
    prev_secs: u64,
    /// Current backoff value in seconds
    current_secs: u64,
    /// Maximum backoff value in seconds
    max_secs: u64,
}

impl FibonacciBackoff {
    /// Create a new Fibonacci backoff with minimum and maximum delays in seconds
    #[must_use]
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            prev_secs: 0,
            current_secs: min_secs.min(max_secs),
            max_secs,
        }
    }

    /// Get the next delay in seconds and advance the sequence
    pub fn next_backoff_seconds(&mut self) -> u64 {
        let result = self.current_secs;
        let next = self.prev_secs + self.current_secs;
        self.prev_secs = self.current_secs;
        self.current_secs = next.min(self.max_secs);
        result
    }

    /// Get the next delay as a `Duration` and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        Duration::from_secs(self.next_backoff_seconds())
    }
}

impl Default for FibonacciBackoff {
    /// 1s minimum, 5s maximum
    fn default() -> Self {
        Self::new(1, 5)
    }
}

/// Block until NetBox answers the status endpoint with the configured token
///
/// Connection and server errors are retried indefinitely following `backoff`;
/// a rejected token is returned immediately since waiting cannot fix it.
pub async fn wait_for_netbox(
    client: &dyn NetBoxClientTrait,
    mut backoff: FibonacciBackoff,
) -> Result<(), NetBoxError> {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        match client.validate_token().await {
            Ok(()) => {
                debug!("NetBox at {} ready after {} attempt(s)", client.base_url(), attempts);
                return Ok(());
            }
            Err(e) if e.is_auth_failure() => return Err(e),
            Err(e) => {
                let delay = backoff.next_backoff();
                info!("NetBox not ready ({}), retrying in {:?}", e, delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}
