use anyhow::Result;

use crate::config::{ContextConfig, ContextManager};
use crate::types::ContextOperation;

pub async fn handle_context_command(operation: &ContextOperation) -> Result<()> {
    let mut manager = ContextManager::new().await?;
    handle_context_command_with_manager(operation, &mut manager).await
}

/// Same as [`handle_context_command`] against an explicit config file.
pub async fn handle_context_command_with_manager(
    operation: &ContextOperation,
    manager: &mut ContextManager,
) -> Result<()> {
    match operation {
        ContextOperation::Set {
            name,
            control_url,
            runtime_url,
            metrics_url,
            namespace,
            endpoint,
        } => {
            let update = ContextConfig {
                control_url: control_url.clone(),
                runtime_url: runtime_url.clone(),
                metrics_url: metrics_url.clone(),
                metrics_namespace: namespace.clone(),
                default_endpoint: endpoint.clone(),
            };
            manager.set_context(name.clone(), update).await?;

            let context_name = name
                .clone()
                .unwrap_or_else(|| manager.config().current_context.clone());
            println!("ctx:'{context_name}' updated successfully");
            if let Some(context) = manager.config().get_context(&context_name) {
                println!("{}", serde_yaml::to_string(context)?.trim_end());
            }
            Ok(())
        }
        ContextOperation::Get => {
            println!("{}", serde_json::to_string_pretty(manager.config())?);
            Ok(())
        }
        ContextOperation::List => {
            let current = &manager.config().current_context;
            for name in manager.config().list_contexts() {
                let mark = if name == current { "*" } else { " " };
                println!("{mark} {name}");
            }
            Ok(())
        }
        ContextOperation::Select { name } => {
            if manager.config().get_context(name).is_none() {
                anyhow::bail!("Context '{name}' does not exist");
            }
            manager.select_context(name.clone()).await?;
            println!("Switched to context '{name}'");
            Ok(())
        }
    }
}
