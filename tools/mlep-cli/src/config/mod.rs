mod context;
mod file;

pub use context::*;
pub use file::*;

use anyhow::Result;
use mlep_client::ServiceUrls;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main CLI configuration structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CliConfig {
    pub contexts: HashMap<String, ContextConfig>,
    pub current_context: String,
}

/// Configuration for a specific context
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContextConfig {
    pub control_url: Option<String>,
    pub runtime_url: Option<String>,
    pub metrics_url: Option<String>,
    /// Overrides the namespace metric queries and alarms are scoped to
    #[serde(default)]
    pub metrics_namespace: Option<String>,
    /// Endpoint used when a command is given none
    #[serde(default)]
    pub default_endpoint: Option<String>,
}

impl ContextConfig {
    pub fn service_urls(&self) -> ServiceUrls {
        ServiceUrls {
            control_url: self.control_url.clone(),
            runtime_url: self.runtime_url.clone(),
            metrics_url: self.metrics_url.clone(),
        }
    }

    pub fn namespace(&self) -> &str {
        self.metrics_namespace
            .as_deref()
            .unwrap_or(mlep_models::DEFAULT_METRIC_NAMESPACE)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        let mut contexts = HashMap::new();
        contexts.insert(
            "default".to_string(),
            ContextConfig {
                control_url: Some("http://localhost:8080".to_string()),
                runtime_url: Some("http://localhost:8080".to_string()),
                metrics_url: Some("http://localhost:8080".to_string()),
                metrics_namespace: None,
                default_endpoint: None,
            },
        );

        Self {
            contexts,
            current_context: "default".to_string(),
        }
    }
}

impl CliConfig {
    /// Get the current context configuration
    pub fn current_context(&self) -> Option<&ContextConfig> {
        self.contexts.get(&self.current_context)
    }

    /// Get a specific context configuration
    pub fn get_context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.get(name)
    }

    /// Set the current context
    pub fn set_current_context(&mut self, name: String) -> Result<()> {
        if !self.contexts.contains_key(&name) {
            return Err(anyhow::anyhow!("Context '{}' does not exist", name));
        }
        self.current_context = name;
        Ok(())
    }

    /// Update or create a context
    pub fn set_context(&mut self, name: String, config: ContextConfig) {
        self.contexts.insert(name, config);
    }

    pub fn list_contexts(&self) -> Vec<&String> {
        let mut names: Vec<_> = self.contexts.keys().collect();
        names.sort();
        names
    }
}

/// Load or create configuration from a specific path
pub async fn load_or_create_config_from_path(
    config_path: &std::path::Path,
) -> Result<CliConfig> {
    match file::load_config_from_path(config_path).await {
        Ok(config) => Ok(config),
        Err(_) => {
            let config = CliConfig::default();
            file::save_config_to_path(&config, config_path).await?;
            Ok(config)
        }
    }
}
