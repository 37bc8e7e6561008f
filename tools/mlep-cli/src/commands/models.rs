use anyhow::Result;
use mlep_client::EndpointControl;
use serde_json::json;

use super::Session;
use crate::output::{OutputArgs, print_rows};
use crate::types::ModelsOperation;

const MODEL_COLUMNS: [&str; 5] =
    ["Domain", "Task", "Framework", "FrameworkVersion", "Model"];

pub async fn handle_models_command(operation: &ModelsOperation) -> Result<()> {
    match operation {
        ModelsOperation::List { output } => {
            let session = Session::load().await?;
            list_models(&session.client, output).await
        }
    }
}

async fn list_models(
    control: &dyn EndpointControl,
    output: &OutputArgs,
) -> Result<()> {
    let rows: Vec<_> = control
        .list_model_metadata()
        .await?
        .into_iter()
        .map(|m| {
            json!({
                "Domain": m.domain,
                "Task": m.task,
                "Framework": m.framework,
                "FrameworkVersion": m.framework_version,
                "Model": m.model,
            })
        })
        .collect();
    let columns = MODEL_COLUMNS.map(String::from);
    print_rows(&serde_json::Value::Array(rows), &columns, &output.output)
}
