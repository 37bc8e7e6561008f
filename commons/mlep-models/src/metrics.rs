use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregation applied to raw samples within one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    SampleCount,
    Average,
    Sum,
    Minimum,
    Maximum,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SampleCount => "SampleCount",
            Self::Average => "Average",
            Self::Sum => "Sum",
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SampleCount" => Ok(Self::SampleCount),
            "Average" => Ok(Self::Average),
            "Sum" => Ok(Self::Sum),
            "Minimum" => Ok(Self::Minimum),
            "Maximum" => Ok(Self::Maximum),
            other => Err(format!("unknown statistic '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn endpoint_name(value: impl Into<String>) -> Self {
        Self::new("EndpointName", value)
    }

    pub fn variant_name(value: impl Into<String>) -> Self {
        Self::new("VariantName", value)
    }

    pub fn endpoint_config_name(value: impl Into<String>) -> Self {
        Self::new("EndpointConfigName", value)
    }
}

/// One aggregated bucket returned by a statistics query. Only the
/// statistics that were requested are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl Datapoint {
    pub fn new(timestamp: DateTime<Utc>, statistic: Statistic, value: f64) -> Self {
        let mut dp = Self {
            timestamp,
            unit: "None".to_string(),
            sample_count: None,
            average: None,
            sum: None,
            minimum: None,
            maximum: None,
        };
        match statistic {
            Statistic::SampleCount => dp.sample_count = Some(value),
            Statistic::Average => dp.average = Some(value),
            Statistic::Sum => dp.sum = Some(value),
            Statistic::Minimum => dp.minimum = Some(value),
            Statistic::Maximum => dp.maximum = Some(value),
        }
        dp
    }

    pub fn value(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::SampleCount => self.sample_count,
            Statistic::Average => self.average,
            Statistic::Sum => self.sum,
            Statistic::Minimum => self.minimum,
            Statistic::Maximum => self.maximum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricQuery {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Bucket width in seconds.
    pub period: u32,
    pub statistics: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStatisticsOutput {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datapoint_selects_requested_statistic() {
        let json = r#"{"Timestamp":"2024-05-01T10:00:00Z","Sum":12.0,"Unit":"None"}"#;
        let dp: Datapoint = serde_json::from_str(json).unwrap();
        assert_eq!(dp.value(Statistic::Sum), Some(12.0));
        assert_eq!(dp.value(Statistic::Average), None);
    }

    #[test]
    fn statistic_parses_from_cli_names() {
        assert_eq!("Average".parse::<Statistic>().unwrap(), Statistic::Average);
        assert!("p99".parse::<Statistic>().is_err());
    }
}
