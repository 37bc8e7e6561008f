mod alarm;
mod archive;
mod context;
mod endpoint;
mod metrics;
mod models;
mod traffic;

pub use alarm::*;
pub use archive::*;
pub use context::*;
pub use endpoint::*;
pub use metrics::*;
pub use models::*;
pub use traffic::*;

use anyhow::{Context, Result};
use mlep_client::HttpClient;

use crate::config::{ContextConfig, ContextManager};

/// Client and settings of the current context.
pub(crate) struct Session {
    pub client: HttpClient,
    pub context: ContextConfig,
}

impl Session {
    pub async fn load() -> Result<Self> {
        let manager = ContextManager::new().await?;
        let context = manager.get_current_context().cloned().with_context(|| {
            format!(
                "current context '{}' is not configured",
                manager.config().current_context
            )
        })?;
        let client = HttpClient::new(context.service_urls())?;
        Ok(Self { client, context })
    }

    /// The given endpoint name, or the context's default endpoint.
    pub fn endpoint(&self, name: Option<&str>) -> Result<String> {
        name.map(str::to_string)
            .or_else(|| self.context.default_endpoint.clone())
            .context("no endpoint given and the context has no default endpoint")
    }
}
