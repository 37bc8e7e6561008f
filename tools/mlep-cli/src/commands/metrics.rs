use anyhow::Result;

use super::Session;
use crate::metrics::{
    MetricsRequest, MetricsTable, TimeWindow, get_endpoint_metrics,
    plot_variant_invocations, render_chart,
};
use crate::output::{OutputArgs, print_rows};
use crate::types::{MetricsOperation, WindowArgs};

pub async fn handle_metrics_command(operation: &MetricsOperation) -> Result<()> {
    let session = Session::load().await?;
    let namespace = session.context.namespace();
    match operation {
        MetricsOperation::Invocations {
            endpoint,
            variant1,
            variant2,
            window,
            output,
        } => {
            let table = plot_variant_invocations(
                &session.client,
                namespace,
                endpoint,
                variant1,
                variant2,
                time_window(window),
            )
            .await?;
            show(table, "Invocations-Sum", window, output)
        }
        MetricsOperation::Query {
            endpoint,
            variant,
            metric,
            statistic,
            config_name,
            window,
            output,
        } => {
            let request = MetricsRequest {
                namespace: namespace.to_string(),
                endpoint_name: endpoint.clone(),
                endpoint_config_name: config_name.clone(),
                variant_name: variant.clone(),
                metric_name: metric.clone(),
                statistic: *statistic,
            };
            let table =
                get_endpoint_metrics(&session.client, &request, time_window(window))
                    .await?;
            show(table, &format!("{metric}-{statistic}"), window, output)
        }
    }
}

fn time_window(args: &WindowArgs) -> TimeWindow {
    match args.start {
        Some(start) => TimeWindow::since(start),
        None => TimeWindow::trailing(args.minutes),
    }
}

fn show(
    table: Option<MetricsTable>,
    title: &str,
    window: &WindowArgs,
    output: &OutputArgs,
) -> Result<()> {
    let Some(table) = table else {
        eprintln!("No datapoints for {title}");
        return Ok(());
    };
    if window.chart {
        print!("{}", render_chart(&table, title));
        Ok(())
    } else {
        print_rows(&table.to_json(), &table.headers(), &output.output)
    }
}
