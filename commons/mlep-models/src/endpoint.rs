use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a hosted endpoint, as reported by the control plane.
///
/// Unknown values are kept verbatim in [`EndpointStatus::Other`] so that a
/// newer service release never breaks deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EndpointStatus {
    OutOfService,
    Creating,
    Updating,
    SystemUpdating,
    RollingBack,
    InService,
    Deleting,
    Failed,
    UpdateRollbackFailed,
    Other(String),
}

impl EndpointStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OutOfService => "OutOfService",
            Self::Creating => "Creating",
            Self::Updating => "Updating",
            Self::SystemUpdating => "SystemUpdating",
            Self::RollingBack => "RollingBack",
            Self::InService => "InService",
            Self::Deleting => "Deleting",
            Self::Failed => "Failed",
            Self::UpdateRollbackFailed => "UpdateRollbackFailed",
            Self::Other(s) => s.as_str(),
        }
    }

    /// `InService` and `Failed` end an update wait.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::InService | Self::Failed)
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Creating
                | Self::Updating
                | Self::SystemUpdating
                | Self::RollingBack
                | Self::Deleting
        )
    }
}

impl From<String> for EndpointStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OutOfService" => Self::OutOfService,
            "Creating" => Self::Creating,
            "Updating" => Self::Updating,
            "SystemUpdating" => Self::SystemUpdating,
            "RollingBack" => Self::RollingBack,
            "InService" => Self::InService,
            "Deleting" => Self::Deleting,
            "Failed" => Self::Failed,
            "UpdateRollbackFailed" => Self::UpdateRollbackFailed,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for EndpointStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<EndpointStatus> for String {
    fn from(value: EndpointStatus) -> Self {
        match value {
            EndpointStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductionVariantSummary {
    pub variant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_instance_count: Option<u32>,
}

/// Result of a describe-endpoint call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointDescription {
    pub endpoint_name: String,
    pub endpoint_status: EndpointStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_config_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub production_variants: Vec<ProductionVariantSummary>,
}

impl EndpointDescription {
    pub fn new(name: impl Into<String>, status: EndpointStatus) -> Self {
        Self {
            endpoint_name: name.into(),
            endpoint_status: status,
            endpoint_config_name: None,
            failure_reason: None,
            creation_time: None,
            last_modified_time: None,
            production_variants: Vec::new(),
        }
    }
}
