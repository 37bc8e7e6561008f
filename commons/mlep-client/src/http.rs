use super::{ClientError, Surface};
use crate::{EndpointControl, EndpointRuntime, MetricsService, ServiceUrls};
use async_trait::async_trait;
use bytes::Bytes;
use mlep_models::{
    Datapoint, EndpointDescription, InvocationRequest, ListModelMetadataOutput,
    MetricAlarm, MetricQuery, MetricStatisticsOutput, ModelMetadataSummary,
};
use reqwest::{Client, Response, Url, header::CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

/// Header used to route an invocation to a single production variant.
pub const TARGET_VARIANT_HEADER: &str = "X-Target-Variant";

/// HTTP client for the control, runtime and metrics APIs
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    urls: ServiceUrls,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(urls: ServiceUrls) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("mlep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::RequestFailed)?;

        Ok(Self { client, urls })
    }

    fn control_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        service_url(self.urls.control_url.as_deref(), Surface::Control, segments)
    }

    fn runtime_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        service_url(self.urls.runtime_url.as_deref(), Surface::Runtime, segments)
    }

    fn metrics_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        service_url(self.urls.metrics_url.as_deref(), Surface::Metrics, segments)
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(
        &self,
        response: Response,
    ) -> Result<T, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = check_status(response).await?;
        let text = response.text().await.map_err(ClientError::RequestFailed)?;
        serde_json::from_str(&text).map_err(ClientError::MalformedResponse)
    }
}

/// Append `segments` to the base URL of `surface`. Each segment is
/// percent-encoded, so names containing `/`, `?` or `#` stay one segment.
fn service_url(
    base: Option<&str>,
    surface: Surface,
    segments: &[&str],
) -> Result<Url, ClientError> {
    let base = base.ok_or(ClientError::UrlNotConfigured(surface))?;
    let mut url = Url::parse(base)
        .map_err(|e| ClientError::invalid_url(surface, base, e))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::invalid_url(surface, base, "cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::rejected(status.as_u16(), error_text))
    }
}

#[async_trait]
impl EndpointControl for HttpClient {
    async fn describe_endpoint(
        &self,
        endpoint_name: &str,
    ) -> Result<EndpointDescription, ClientError> {
        let url = self.control_url(&["endpoints", endpoint_name])?;
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn list_model_metadata(
        &self,
    ) -> Result<Vec<ModelMetadataSummary>, ClientError> {
        let url = self.control_url(&["model-metadata"])?;
        let response = self.client.get(url).send().await?;
        let output: ListModelMetadataOutput =
            self.handle_response(response).await?;
        Ok(output.model_metadata_summaries)
    }
}

#[async_trait]
impl EndpointRuntime for HttpClient {
    async fn invoke_endpoint(
        &self,
        request: InvocationRequest,
    ) -> Result<Bytes, ClientError> {
        let url = self.runtime_url(&[
            "endpoints",
            request.endpoint_name.as_str(),
            "invocations",
        ])?;
        let mut builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, request.content_type.as_str())
            .body(request.body);
        if let Some(variant) = &request.target_variant {
            builder = builder.header(TARGET_VARIANT_HEADER, variant.as_str());
        }
        let response = check_status(builder.send().await?).await?;
        let body = response.bytes().await?;
        debug!(
            endpoint = %request.endpoint_name,
            bytes = body.len(),
            "invocation completed"
        );
        Ok(body)
    }
}

#[async_trait]
impl MetricsService for HttpClient {
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
    ) -> Result<Vec<Datapoint>, ClientError> {
        let url = self.metrics_url(&["metric-statistics"])?;
        let response = self.client.post(url).json(query).send().await?;
        let output: MetricStatisticsOutput =
            self.handle_response(response).await?;
        debug!(
            metric = %query.metric_name,
            datapoints = output.datapoints.len(),
            "metric statistics fetched"
        );
        Ok(output.datapoints)
    }

    async fn put_metric_alarm(
        &self,
        alarm: &MetricAlarm,
    ) -> Result<(), ClientError> {
        let url = self.metrics_url(&["alarms", alarm.alarm_name.as_str()])?;
        let response = self.client.put(url).json(alarm).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
