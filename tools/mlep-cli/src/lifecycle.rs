//! Waiting on endpoint status transitions.
//!
//! Both waits only re-read the endpoint; the status is owned by the remote
//! service. Each wait is bounded by an optional timeout and can be stopped
//! through a [`CancellationToken`].

use std::time::Duration;

use mlep_client::{ClientError, EndpointControl};
use mlep_models::{EndpointDescription, EndpointStatus};
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const CREATION_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const UPDATE_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum WaitError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
    #[error("Timed out after {waited:?} waiting on endpoint '{endpoint}' (last status: {last_status})")]
    Timeout {
        endpoint: String,
        last_status: EndpointStatus,
        waited: Duration,
    },
    #[error("Wait on endpoint '{0}' was cancelled")]
    Cancelled(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` waits forever.
    pub timeout: Option<Duration>,
}

impl PollPolicy {
    pub fn creation() -> Self {
        Self {
            interval: CREATION_POLL_INTERVAL,
            timeout: None,
        }
    }

    pub fn update() -> Self {
        Self {
            interval: UPDATE_POLL_INTERVAL,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

struct Poller<'a> {
    endpoint: &'a str,
    policy: PollPolicy,
    cancel: &'a CancellationToken,
    started: Instant,
}

impl<'a> Poller<'a> {
    fn new(
        endpoint: &'a str,
        policy: PollPolicy,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            endpoint,
            policy,
            cancel,
            started: Instant::now(),
        }
    }

    /// Sleep one interval, unless the deadline or a cancel comes first.
    async fn pause(&self, last_status: &EndpointStatus) -> Result<(), WaitError> {
        if let Some(timeout) = self.policy.timeout {
            let waited = self.started.elapsed();
            if waited + self.policy.interval > timeout {
                return Err(WaitError::Timeout {
                    endpoint: self.endpoint.to_string(),
                    last_status: last_status.clone(),
                    waited,
                });
            }
        }
        tokio::select! {
            _ = self.cancel.cancelled() => {
                Err(WaitError::Cancelled(self.endpoint.to_string()))
            }
            _ = tokio::time::sleep(self.policy.interval) => Ok(()),
        }
    }
}

/// Wait until the endpoint leaves `Creating` and return its final
/// description.
///
/// Any status other than `Creating` ends the wait, including ones that are
/// not terminal; those are reported with a warning.
pub async fn wait_for_creation(
    control: &dyn EndpointControl,
    endpoint_name: &str,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<EndpointDescription, WaitError> {
    let poller = Poller::new(endpoint_name, policy, cancel);
    let mut description = control.describe_endpoint(endpoint_name).await?;

    while description.endpoint_status == EndpointStatus::Creating {
        description = control.describe_endpoint(endpoint_name).await?;
        info!(endpoint = endpoint_name, status = %description.endpoint_status, "endpoint status");
        if description.endpoint_status == EndpointStatus::Creating {
            poller.pause(&description.endpoint_status).await?;
        }
    }

    if !description.endpoint_status.is_terminal() {
        warn!(
            endpoint = endpoint_name,
            status = %description.endpoint_status,
            "creation wait ended on a non-terminal status"
        );
    }
    Ok(description)
}

/// Wait until the endpoint reports `InService` or `Failed` and return that
/// status.
pub async fn wait_for_update(
    control: &dyn EndpointControl,
    endpoint_name: &str,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<EndpointStatus, WaitError> {
    let poller = Poller::new(endpoint_name, policy, cancel);
    loop {
        let status = control
            .describe_endpoint(endpoint_name)
            .await?
            .endpoint_status;
        if status.is_terminal() {
            info!(endpoint = endpoint_name, %status, "update finished");
            return Ok(status);
        }
        debug!(endpoint = endpoint_name, %status, "update in progress");
        poller.pause(&status).await?;
    }
}
