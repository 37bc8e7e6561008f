//! Clients for the managed inference service.
//!
//! The service is split into three surfaces, each behind its own trait so
//! callers can be handed a fake in tests:
//!
//! * [`EndpointControl`] for control-plane reads,
//! * [`EndpointRuntime`] for data-plane invocations,
//! * [`MetricsService`] for metric statistics and alarms.
//!
//! [`HttpClient`] implements all three over REST.

mod error;
mod http;

pub use error::*;
pub use http::*;

use async_trait::async_trait;
use bytes::Bytes;
use mlep_models::{
    Datapoint, EndpointDescription, InvocationRequest, MetricAlarm,
    MetricQuery, ModelMetadataSummary,
};

#[async_trait]
pub trait EndpointControl: Send + Sync {
    async fn describe_endpoint(
        &self,
        endpoint_name: &str,
    ) -> Result<EndpointDescription, ClientError>;

    async fn list_model_metadata(
        &self,
    ) -> Result<Vec<ModelMetadataSummary>, ClientError>;
}

#[async_trait]
pub trait EndpointRuntime: Send + Sync {
    /// Send one request and return the raw response body.
    async fn invoke_endpoint(
        &self,
        request: InvocationRequest,
    ) -> Result<Bytes, ClientError>;
}

#[async_trait]
pub trait MetricsService: Send + Sync {
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
    ) -> Result<Vec<Datapoint>, ClientError>;

    async fn put_metric_alarm(
        &self,
        alarm: &MetricAlarm,
    ) -> Result<(), ClientError>;
}

/// Base URLs of the three service surfaces. Any of them may be left unset
/// when the caller only needs the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUrls {
    pub control_url: Option<String>,
    pub runtime_url: Option<String>,
    pub metrics_url: Option<String>,
}
