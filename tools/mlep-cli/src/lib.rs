mod alarm;
mod archive;
mod commands;
mod config;
mod lifecycle;
mod metrics;
mod output;
mod traffic;
mod types;

#[cfg(test)]
mod testing;

use std::process;

pub use alarm::{auto_rollback_alarm, create_auto_rollback_alarm};
pub use archive::create_tar;
pub use lifecycle::{PollPolicy, WaitError, wait_for_creation, wait_for_update};
pub use metrics::{
    MetricsRequest, MetricsTable, TimeWindow, get_endpoint_metrics,
    get_invocation_metrics_for_variant, plot_variant_invocations,
    render_chart,
};
pub use output::{OutputArgs, print_output};
pub use traffic::{
    InvocationReport, TrafficError, invoke_from_payload_file,
    invoke_max_invocations, invoke_with_single_sentence,
};
pub use types::{
    AlarmOperation, ContextOperation, EndpointOperation, MetricsOperation,
    MlepCli, MlepCommands, ModelsOperation, OutputFormat, TrafficOperation,
};

pub async fn run(cli: MlepCli) {
    let (label, result) = match &cli.command {
        MlepCommands::Archive { dest, source } => {
            ("Archive", commands::handle_archive_command(dest, source).await)
        }
        MlepCommands::Models { opt } => {
            ("Models", commands::handle_models_command(opt).await)
        }
        MlepCommands::Endpoint { opt } => {
            ("Endpoint", commands::handle_endpoint_command(opt).await)
        }
        MlepCommands::Traffic { opt } => {
            ("Traffic", commands::handle_traffic_command(opt).await)
        }
        MlepCommands::Metrics { opt } => {
            ("Metrics", commands::handle_metrics_command(opt).await)
        }
        MlepCommands::Alarm { opt } => {
            ("Alarm", commands::handle_alarm_command(opt).await)
        }
        MlepCommands::Context { opt } => {
            ("Context", commands::handle_context_command(opt).await)
        }
    };
    if let Err(e) = result {
        eprintln!("{label} command failed: {e:#}");
        process::exit(1);
    }
}
