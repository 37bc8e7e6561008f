use mlep_client::{ClientError, MetricsService};
use mlep_models::{
    ComparisonOperator, Dimension, MetricAlarm, Statistic, TreatMissingData,
};
use tracing::info;

pub const AUTO_ROLLBACK_DESCRIPTION: &str =
    "Endpoint deployment auto-rollback alarm";

/// Alarm watching one variant's metric over single one-minute periods.
/// Actions stay disabled; the alarm only exists to be referenced by a
/// deployment's rollback configuration.
pub fn auto_rollback_alarm(
    namespace: &str,
    alarm_name: &str,
    endpoint_name: &str,
    variant_name: &str,
    metric_name: &str,
    statistic: Statistic,
    threshold: f64,
) -> MetricAlarm {
    MetricAlarm {
        alarm_name: alarm_name.to_string(),
        alarm_description: AUTO_ROLLBACK_DESCRIPTION.to_string(),
        actions_enabled: false,
        namespace: namespace.to_string(),
        metric_name: metric_name.to_string(),
        statistic,
        dimensions: vec![
            Dimension::endpoint_name(endpoint_name),
            Dimension::variant_name(variant_name),
        ],
        period: 60,
        evaluation_periods: 1,
        threshold,
        comparison_operator: ComparisonOperator::GreaterThanOrEqualToThreshold,
        treat_missing_data: TreatMissingData::NotBreaching,
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn create_auto_rollback_alarm(
    metrics: &dyn MetricsService,
    namespace: &str,
    alarm_name: &str,
    endpoint_name: &str,
    variant_name: &str,
    metric_name: &str,
    statistic: Statistic,
    threshold: f64,
) -> Result<MetricAlarm, ClientError> {
    let alarm = auto_rollback_alarm(
        namespace,
        alarm_name,
        endpoint_name,
        variant_name,
        metric_name,
        statistic,
        threshold,
    );
    metrics.put_metric_alarm(&alarm).await?;
    info!(alarm = alarm_name, endpoint = endpoint_name, variant = variant_name, "alarm registered");
    Ok(alarm)
}
