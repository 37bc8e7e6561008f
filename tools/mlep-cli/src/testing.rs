//! In-memory stand-ins for the remote service, used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use mlep_client::{ClientError, EndpointControl, EndpointRuntime, MetricsService};
use mlep_models::{
    Datapoint, EndpointDescription, EndpointStatus, InvocationRequest,
    MetricAlarm, MetricQuery, ModelMetadataSummary,
};

/// Answers describe calls from a fixed status script. Once the script runs
/// out it either repeats a status forever or fails with a 500.
pub struct ScriptedControl {
    endpoint: String,
    statuses: Mutex<VecDeque<EndpointStatus>>,
    repeat: Option<EndpointStatus>,
    calls: AtomicUsize,
}

impl ScriptedControl {
    pub fn new(endpoint: &str, statuses: &[&str]) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            statuses: Mutex::new(statuses.iter().map(|s| (*s).into()).collect()),
            repeat: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn repeating(endpoint: &str, status: &str) -> Self {
        Self {
            repeat: Some(status.into()),
            ..Self::new(endpoint, &[])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EndpointControl for ScriptedControl {
    async fn describe_endpoint(
        &self,
        endpoint_name: &str,
    ) -> Result<EndpointDescription, ClientError> {
        assert_eq!(endpoint_name, self.endpoint);
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        match next.or_else(|| self.repeat.clone()) {
            Some(status) => Ok(EndpointDescription::new(endpoint_name, status)),
            None => Err(ClientError::rejected(500, "script exhausted")),
        }
    }

    async fn list_model_metadata(
        &self,
    ) -> Result<Vec<ModelMetadataSummary>, ClientError> {
        Ok(Vec::new())
    }
}

/// Records every invocation; requests whose body is listed in `fail_on`
/// are rejected with a 400.
#[derive(Default)]
pub struct RecordingRuntime {
    pub requests: Mutex<Vec<InvocationRequest>>,
    fail_on: Vec<String>,
}

impl RecordingRuntime {
    pub fn failing_on(bodies: &[&str]) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on: bodies.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn bodies(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| String::from_utf8_lossy(&r.body).into_owned())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl EndpointRuntime for RecordingRuntime {
    async fn invoke_endpoint(
        &self,
        request: InvocationRequest,
    ) -> Result<Bytes, ClientError> {
        let body = String::from_utf8_lossy(&request.body).into_owned();
        self.requests.lock().unwrap().push(request);
        if self.fail_on.contains(&body) {
            return Err(ClientError::rejected(400, format!("bad row {body}")));
        }
        Ok(Bytes::from(format!("ok:{body}")))
    }
}

/// Serves datapoints keyed by the `VariantName` dimension and records alarms.
#[derive(Default)]
pub struct FakeMetrics {
    pub series: Mutex<Vec<(String, Vec<Datapoint>)>>,
    pub queries: Mutex<Vec<MetricQuery>>,
    pub alarms: Mutex<Vec<MetricAlarm>>,
}

impl FakeMetrics {
    pub fn with_series(series: Vec<(&str, Vec<Datapoint>)>) -> Self {
        Self {
            series: Mutex::new(
                series
                    .into_iter()
                    .map(|(v, d)| (v.to_string(), d))
                    .collect(),
            ),
            ..Default::default()
        }
    }
}

#[async_trait]
impl MetricsService for FakeMetrics {
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
    ) -> Result<Vec<Datapoint>, ClientError> {
        self.queries.lock().unwrap().push(query.clone());
        let variant = query
            .dimensions
            .iter()
            .find(|d| d.name == "VariantName")
            .map(|d| d.value.clone())
            .unwrap_or_default();
        Ok(self
            .series
            .lock()
            .unwrap()
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, d)| d.clone())
            .unwrap_or_default())
    }

    async fn put_metric_alarm(
        &self,
        alarm: &MetricAlarm,
    ) -> Result<(), ClientError> {
        self.alarms.lock().unwrap().push(alarm.clone());
        Ok(())
    }
}
