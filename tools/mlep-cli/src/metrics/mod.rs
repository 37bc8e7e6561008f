mod chart;
mod table;

pub use chart::render_chart;
pub use table::MetricsTable;

use chrono::{DateTime, Duration, Utc};
use mlep_client::{ClientError, MetricsService};
use mlep_models::{Dimension, MetricQuery, Statistic};
use tracing::debug;

/// Bucket width for every statistics query, in seconds.
pub const METRIC_PERIOD_SECS: u32 = 60;
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;
/// Column name used when a query is not scoped to an endpoint config.
pub const ALL_CONFIGS_COLUMN: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The last `minutes` minutes up to now.
    pub fn trailing(minutes: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::minutes(minutes),
            end,
        }
    }

    pub fn since(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: Utc::now(),
        }
    }
}

/// Parameters of a single-variant metrics query.
#[derive(Debug, Clone)]
pub struct MetricsRequest {
    pub namespace: String,
    pub endpoint_name: String,
    pub endpoint_config_name: Option<String>,
    pub variant_name: String,
    pub metric_name: String,
    pub statistic: Statistic,
}

impl MetricsRequest {
    fn query(&self, window: TimeWindow) -> MetricQuery {
        let mut dimensions = vec![
            Dimension::endpoint_name(&self.endpoint_name),
            Dimension::variant_name(&self.variant_name),
        ];
        if let Some(config) = &self.endpoint_config_name {
            dimensions.push(Dimension::endpoint_config_name(config));
        }
        MetricQuery {
            namespace: self.namespace.clone(),
            metric_name: self.metric_name.clone(),
            dimensions,
            start_time: window.start,
            end_time: window.end,
            period: METRIC_PERIOD_SECS,
            statistics: vec![self.statistic],
        }
    }
}

/// Fetch one metric for a variant. The value column is named after the
/// endpoint config, or `ALL` when the query spans every config. Returns
/// `None` when the service has no datapoints for the window.
pub async fn get_endpoint_metrics(
    metrics: &dyn MetricsService,
    request: &MetricsRequest,
    window: TimeWindow,
) -> Result<Option<MetricsTable>, ClientError> {
    let datapoints = metrics.get_metric_statistics(&request.query(window)).await?;
    debug!(
        endpoint = %request.endpoint_name,
        variant = %request.variant_name,
        metric = %request.metric_name,
        datapoints = datapoints.len(),
        "metrics fetched"
    );
    if datapoints.is_empty() {
        return Ok(None);
    }
    let column = request
        .endpoint_config_name
        .clone()
        .unwrap_or_else(|| ALL_CONFIGS_COLUMN.to_string());
    Ok(Some(MetricsTable::from_datapoints(
        column,
        request.statistic,
        &datapoints,
    )))
}

/// Per-minute `Invocations` sum for one variant, in a column named after
/// the variant.
pub async fn get_invocation_metrics_for_variant(
    metrics: &dyn MetricsService,
    namespace: &str,
    endpoint_name: &str,
    variant_name: &str,
    window: TimeWindow,
) -> Result<MetricsTable, ClientError> {
    let request = MetricsRequest {
        namespace: namespace.to_string(),
        endpoint_name: endpoint_name.to_string(),
        endpoint_config_name: None,
        variant_name: variant_name.to_string(),
        metric_name: "Invocations".to_string(),
        statistic: Statistic::Sum,
    };
    let datapoints = metrics.get_metric_statistics(&request.query(window)).await?;
    Ok(MetricsTable::from_datapoints(
        variant_name,
        Statistic::Sum,
        &datapoints,
    ))
}

/// Invocations of two variants side by side, outer-joined on timestamp.
pub async fn plot_variant_invocations(
    metrics: &dyn MetricsService,
    namespace: &str,
    endpoint_name: &str,
    variant1: &str,
    variant2: &str,
    window: TimeWindow,
) -> Result<Option<MetricsTable>, ClientError> {
    let first = get_invocation_metrics_for_variant(
        metrics,
        namespace,
        endpoint_name,
        variant1,
        window,
    )
    .await?;
    let second = get_invocation_metrics_for_variant(
        metrics,
        namespace,
        endpoint_name,
        variant2,
        window,
    )
    .await?;
    let joined = first.outer_join(second);
    Ok((!joined.is_empty()).then_some(joined))
}
