use serde::{Deserialize, Serialize};

/// A standard model from the managed service's model zoo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelMetadataSummary {
    pub domain: String,
    pub framework: String,
    pub framework_version: String,
    pub task: String,
    pub model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListModelMetadataOutput {
    #[serde(default)]
    pub model_metadata_summaries: Vec<ModelMetadataSummary>,
}
