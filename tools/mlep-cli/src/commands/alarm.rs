use anyhow::Result;

use super::Session;
use crate::alarm::create_auto_rollback_alarm;
use crate::output::print_output;
use crate::types::AlarmOperation;

pub async fn handle_alarm_command(operation: &AlarmOperation) -> Result<()> {
    match operation {
        AlarmOperation::Create {
            alarm_name,
            endpoint,
            variant,
            metric,
            statistic,
            threshold,
            output,
        } => {
            let session = Session::load().await?;
            let alarm = create_auto_rollback_alarm(
                &session.client,
                session.context.namespace(),
                alarm_name,
                endpoint,
                variant,
                metric,
                *statistic,
                *threshold,
            )
            .await?;
            print_output(&serde_json::to_value(&alarm)?, &output.output)
        }
    }
}
