//! Test-traffic generation against a hosted endpoint.
//!
//! Every mode is strictly sequential: one request in flight, a fixed sleep
//! between requests.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use mlep_client::{ClientError, EndpointRuntime};
use mlep_models::InvocationRequest;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

pub const DEFAULT_PAYLOAD_FILE: &str = "../sample_payload/batch_data.csv";
pub const SINGLE_SENTENCE_DELAY: Duration = Duration::from_millis(500);
pub const REPLAY_DELAY: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum TrafficError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
    #[error("Failed to read payload file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InvocationReport {
    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
}

fn progress(mark: char) {
    print!("{mark}");
    let _ = std::io::stdout().flush();
}

/// Send each payload as JSON to `variant` of `endpoint_name` and collect the
/// decoded response bodies in order. The first failure aborts the batch.
pub async fn invoke_with_single_sentence(
    runtime: &dyn EndpointRuntime,
    payloads: &[Value],
    endpoint_name: &str,
    variant_name: &str,
    delay: Duration,
) -> Result<Vec<String>, TrafficError> {
    info!(endpoint = endpoint_name, variant = variant_name, count = payloads.len(), "sending test traffic");
    let mut predictions = Vec::with_capacity(payloads.len());
    for payload in payloads {
        progress('.');
        let request =
            InvocationRequest::json(endpoint_name, serde_json::to_vec(payload)?)
                .with_target_variant(variant_name);
        let body = runtime.invoke_endpoint(request).await?;
        predictions.push(String::from_utf8_lossy(&body).into_owned());
        tokio::time::sleep(delay).await;
    }
    println!();
    Ok(predictions)
}

/// Replay the payload file once, one CSV row per request, discarding the
/// responses. Returns the number of rows sent.
pub async fn invoke_from_payload_file(
    runtime: &dyn EndpointRuntime,
    endpoint_name: &str,
    payload_file: &Path,
    delay: Duration,
) -> Result<u64, TrafficError> {
    let file = tokio::fs::File::open(payload_file).await?;
    let mut lines = BufReader::new(file).lines();
    let mut sent = 0u64;
    while let Some(row) = lines.next_line().await? {
        progress('.');
        let _ = runtime
            .invoke_endpoint(InvocationRequest::csv(endpoint_name, row))
            .await?;
        sent += 1;
        tokio::time::sleep(delay).await;
    }
    debug!(endpoint = endpoint_name, sent, "payload file replayed");
    Ok(sent)
}

/// Number of passes over a file of `rows` lines needed to reach
/// `max_invocations`, rounding half to even.
pub fn replay_rounds(max_invocations: u64, rows: usize) -> u64 {
    if rows == 0 {
        return 0;
    }
    (max_invocations as f64 / rows as f64).round_ties_even() as u64
}

/// Replay the payload file until `max_invocations` is exceeded.
///
/// Each attempt counts toward the budget whether or not it succeeds, and the
/// run stops once the count passes the budget, so at most
/// `max_invocations + 1` requests go out. A failed request is marked `E`;
/// with `should_raise` set it also ends the run with that error.
pub async fn invoke_max_invocations(
    runtime: &dyn EndpointRuntime,
    endpoint_name: &str,
    payload_file: &Path,
    max_invocations: u64,
    wait_interval: Duration,
    should_raise: bool,
) -> Result<InvocationReport, TrafficError> {
    let content = tokio::fs::read_to_string(payload_file).await?;
    let rows: Vec<&str> = content.lines().collect();
    let rounds = replay_rounds(max_invocations, rows.len());
    info!(endpoint = endpoint_name, max_invocations, rounds, "sending test traffic");

    let mut report = InvocationReport::default();
    'rounds: for _ in 0..rounds {
        for row in &rows {
            let request = InvocationRequest::csv(endpoint_name, *row);
            match runtime.invoke_endpoint(request).await {
                Ok(_) => {
                    report.succeeded += 1;
                    progress('.');
                }
                Err(e) => {
                    report.failed += 1;
                    progress('E');
                    warn!(endpoint = endpoint_name, error = %e, "invocation failed");
                    if should_raise {
                        return Err(e.into());
                    }
                }
            }
            report.attempted += 1;
            debug!(attempted = report.attempted, failed = report.failed, "bounded traffic progress");
            if report.attempted > max_invocations {
                break 'rounds;
            }
            tokio::time::sleep(wait_interval).await;
        }
    }
    println!();
    info!(
        attempted = report.attempted,
        failed = report.failed,
        "test traffic done"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRuntime;
    use tempfile::NamedTempFile;
    use tokio::time::Instant;

    fn payload_file(rows: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for i in 0..rows {
            writeln!(file, "{i},0.5,1.25").unwrap();
        }
        file
    }

    #[tokio::test(start_paused = true)]
    async fn single_sentence_targets_variant_and_collects_bodies() {
        let runtime = RecordingRuntime::default();
        let payloads = vec![
            serde_json::json!({"inputs": "I love it"}),
            serde_json::json!({"inputs": "I hate it"}),
        ];
        let started = Instant::now();
        let bodies = invoke_with_single_sentence(
            &runtime,
            &payloads,
            "ep",
            "Variant2",
            SINGLE_SENTENCE_DELAY,
        )
        .await
        .unwrap();

        assert_eq!(
            bodies,
            vec![
                "ok:{\"inputs\":\"I love it\"}",
                "ok:{\"inputs\":\"I hate it\"}"
            ]
        );
        let requests = runtime.requests.lock().unwrap();
        assert!(requests.iter().all(|r| {
            r.target_variant.as_deref() == Some("Variant2")
                && r.content_type == "application/json"
        }));
        assert_eq!(started.elapsed(), SINGLE_SENTENCE_DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn single_sentence_aborts_on_first_failure() {
        let runtime = RecordingRuntime::failing_on(&["\"b\""]);
        let payloads = vec![
            Value::from("a"),
            Value::from("b"),
            Value::from("c"),
        ];
        let err = invoke_with_single_sentence(
            &runtime,
            &payloads,
            "ep",
            "v",
            SINGLE_SENTENCE_DELAY,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TrafficError::Client(_)));
        assert_eq!(runtime.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn payload_file_is_replayed_once_as_csv() {
        let file = payload_file(3);
        let runtime = RecordingRuntime::default();
        let sent =
            invoke_from_payload_file(&runtime, "ep", file.path(), REPLAY_DELAY)
                .await
                .unwrap();
        assert_eq!(sent, 3);
        assert_eq!(runtime.bodies(), vec!["0,0.5,1.25", "1,0.5,1.25", "2,0.5,1.25"]);
        let requests = runtime.requests.lock().unwrap();
        assert!(requests.iter().all(|r| {
            r.content_type == "text/csv" && r.target_variant.is_none()
        }));
    }

    #[tokio::test]
    async fn missing_payload_file_is_io_error() {
        let runtime = RecordingRuntime::default();
        let err = invoke_from_payload_file(
            &runtime,
            "ep",
            Path::new("/nonexistent/batch_data.csv"),
            REPLAY_DELAY,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TrafficError::Io(_)));
    }

    #[test]
    fn rounds_follow_half_to_even() {
        assert_eq!(replay_rounds(100, 100), 1);
        assert_eq!(replay_rounds(150, 100), 2);
        assert_eq!(replay_rounds(250, 100), 2);
        assert_eq!(replay_rounds(40, 100), 0);
        assert_eq!(replay_rounds(10, 0), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_never_exceeds_budget_plus_one() {
        let file = payload_file(10);
        let runtime = RecordingRuntime::default();
        let report = invoke_max_invocations(
            &runtime,
            "ep",
            file.path(),
            15,
            Duration::from_secs(1),
            false,
        )
        .await
        .unwrap();
        // 15 / 10 rounds to 2 passes, stopped once the count passes 15
        assert_eq!(report.attempted, 16);
        assert_eq!(runtime.count(), 16);
        assert_eq!(report.succeeded, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_continues_past_failures_by_default() {
        let file = payload_file(4);
        let runtime = RecordingRuntime::failing_on(&["1,0.5,1.25"]);
        let report = invoke_max_invocations(
            &runtime,
            "ep",
            file.path(),
            4,
            Duration::from_secs(1),
            false,
        )
        .await
        .unwrap();
        assert_eq!(
            report,
            InvocationReport {
                attempted: 4,
                succeeded: 3,
                failed: 1
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_raises_on_first_failure_when_asked() {
        let file = payload_file(4);
        let runtime = RecordingRuntime::failing_on(&["1,0.5,1.25"]);
        let err = invoke_max_invocations(
            &runtime,
            "ep",
            file.path(),
            4,
            Duration::from_secs(1),
            true,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            TrafficError::Client(ClientError::Rejected { status: 400, .. })
        ));
        assert_eq!(runtime.count(), 2);
    }
}
