use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use super::Session;
use crate::output::print_output;
use crate::traffic::{
    invoke_from_payload_file, invoke_max_invocations,
    invoke_with_single_sentence,
};
use crate::types::TrafficOperation;

pub async fn handle_traffic_command(operation: &TrafficOperation) -> Result<()> {
    let session = Session::load().await?;
    match operation {
        TrafficOperation::Single {
            endpoint,
            variant,
            payloads,
            delay_ms,
        } => {
            let mut raw = String::new();
            payloads
                .clone()
                .into_reader()?
                .read_to_string(&mut raw)
                .context("Failed to read payloads")?;
            let payloads: Vec<Value> = serde_json::from_str(&raw)
                .context("Payloads must be a JSON array")?;
            let predictions = invoke_with_single_sentence(
                &session.client,
                &payloads,
                endpoint,
                variant,
                Duration::from_millis(*delay_ms),
            )
            .await?;
            for prediction in predictions {
                println!("{prediction}");
            }
            Ok(())
        }
        TrafficOperation::Replay {
            endpoint,
            file,
            delay_ms,
        } => {
            let name = session.endpoint(endpoint.as_deref())?;
            let sent = invoke_from_payload_file(
                &session.client,
                &name,
                file,
                Duration::from_millis(*delay_ms),
            )
            .await?;
            println!();
            println!("Sent {sent} requests to '{name}'");
            Ok(())
        }
        TrafficOperation::Bounded {
            endpoint,
            file,
            max_invocations,
            wait_interval_ms,
            raise_on_error,
            output,
        } => {
            let name = session.endpoint(endpoint.as_deref())?;
            let report = invoke_max_invocations(
                &session.client,
                &name,
                file,
                *max_invocations,
                Duration::from_millis(*wait_interval_ms),
                *raise_on_error,
            )
            .await?;
            print_output(&serde_json::to_value(report)?, &output.output)
        }
    }
}
