use super::models::{ConnectedAccount, ConnectionStatus};
use super::traits::Backend;
use crate::config::ConnectionConfig;
use crate::error::FlowError;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How the activation wait polls the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    /// `None` waits until the connection is active or the process is interrupted.
    pub timeout: Option<Duration>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

impl From<&ConnectionConfig> for WaitPolicy {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            timeout: config.wait_timeout(),
        }
    }
}

/// Poll the connected account until its status is `ACTIVE`.
///
/// `FAILED` and `EXPIRED` end the wait with `FlowError::ConnectionFailed`.
/// Backend errors are not retried.
pub async fn wait_until_active(
    backend: &dyn Backend,
    connected_account_id: &str,
    app: &str,
    policy: &WaitPolicy,
) -> Result<ConnectedAccount, FlowError> {
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let account = backend.get_connected_account(connected_account_id).await?;
        polls += 1;

        match account.status {
            ConnectionStatus::Active => {
                debug!(connected_account_id, polls, "connection is active");
                return Ok(account);
            }
            status if status.is_terminal_failure() => {
                warn!(connected_account_id, status = status.as_str(), "connection failed");
                return Err(FlowError::ConnectionFailed {
                    app: app.to_string(),
                    status: status.as_str().to_string(),
                });
            }
            _ => {}
        }

        if let Some(timeout) = policy.timeout
            && started.elapsed() + policy.interval > timeout
        {
            return Err(FlowError::WaitTimedOut(timeout.as_secs()));
        }

        tokio::time::sleep(policy.interval).await;
    }
}
