use std::time::Duration;

use anyhow::Result;
use mlep_client::EndpointControl;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::Session;
use crate::lifecycle::{PollPolicy, wait_for_creation, wait_for_update};
use crate::output::print_output;
use crate::types::{EndpointOperation, WaitArgs};

pub async fn handle_endpoint_command(operation: &EndpointOperation) -> Result<()> {
    let session = Session::load().await?;
    match operation {
        EndpointOperation::Describe { endpoint, output } => {
            let name = session.endpoint(endpoint.as_deref())?;
            let description = session.client.describe_endpoint(&name).await?;
            print_output(&serde_json::to_value(&description)?, &output.output)
        }
        EndpointOperation::WaitCreate {
            endpoint,
            wait,
            output,
        } => {
            let name = session.endpoint(endpoint.as_deref())?;
            let cancel = cancel_on_signal();
            let description = wait_for_creation(
                &session.client,
                &name,
                policy(PollPolicy::creation(), wait),
                &cancel,
            )
            .await?;
            print_output(&serde_json::to_value(&description)?, &output.output)
        }
        EndpointOperation::WaitUpdate { endpoint, wait } => {
            let name = session.endpoint(endpoint.as_deref())?;
            let cancel = cancel_on_signal();
            let status = wait_for_update(
                &session.client,
                &name,
                policy(PollPolicy::update(), wait),
                &cancel,
            )
            .await?;
            println!("Endpoint '{name}' is {status}");
            Ok(())
        }
    }
}

fn policy(base: PollPolicy, wait: &WaitArgs) -> PollPolicy {
    let mut policy = base.with_timeout(
        (wait.timeout_secs > 0).then(|| Duration::from_secs(wait.timeout_secs)),
    );
    if let Some(secs) = wait.interval_secs {
        policy.interval = Duration::from_secs(secs);
    }
    policy
}

/// Token cancelled on Ctrl+C or SIGTERM.
fn cancel_on_signal() -> CancellationToken {
    let token = CancellationToken::new();
    let guard = token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("signal received, cancelling wait");
        guard.cancel();
    });
    token
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
