use serde::{Deserialize, Serialize};

use crate::{Dimension, Statistic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    GreaterThanOrEqualToThreshold,
    GreaterThanThreshold,
    LessThanThreshold,
    LessThanOrEqualToThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreatMissingData {
    Breaching,
    NotBreaching,
    Ignore,
    Missing,
}

/// Threshold alarm registration. Write-only from the client side; putting an
/// alarm with an existing name replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricAlarm {
    pub alarm_name: String,
    pub alarm_description: String,
    pub actions_enabled: bool,
    pub namespace: String,
    pub metric_name: String,
    pub statistic: Statistic,
    pub dimensions: Vec<Dimension>,
    pub period: u32,
    pub evaluation_periods: u32,
    pub threshold: f64,
    pub comparison_operator: ComparisonOperator,
    pub treat_missing_data: TreatMissingData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treat_missing_data_wire_name() {
        let s = serde_json::to_string(&TreatMissingData::NotBreaching).unwrap();
        assert_eq!(s, "\"notBreaching\"");
    }
}
