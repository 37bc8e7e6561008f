use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap_stdin::FileOrStdin;
use mlep_models::Statistic;

use crate::output::OutputArgs;

/// Main CLI structure
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct MlepCli {
    #[command(subcommand)]
    pub command: MlepCommands,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum MlepCommands {
    /// Package a model directory into a gzip-compressed tar archive
    #[clap(aliases = &["tar", "a"])]
    Archive {
        /// Archive file to write
        dest: PathBuf,
        /// Directory whose files are packed
        source: PathBuf,
    },
    /// Standard model metadata
    #[clap(aliases = &["model", "m"])]
    Models {
        #[command(subcommand)]
        opt: ModelsOperation,
    },
    /// Endpoint status and lifecycle waits
    #[clap(aliases = &["ep", "e"])]
    Endpoint {
        #[command(subcommand)]
        opt: EndpointOperation,
    },
    /// Send test traffic to an endpoint
    #[clap(aliases = &["tr", "t"])]
    Traffic {
        #[command(subcommand)]
        opt: TrafficOperation,
    },
    /// Read per-variant endpoint metrics
    #[clap(aliases = &["met"])]
    Metrics {
        #[command(subcommand)]
        opt: MetricsOperation,
    },
    /// Register metric alarms
    #[clap(aliases = &["al"])]
    Alarm {
        #[command(subcommand)]
        opt: AlarmOperation,
    },
    /// Context management operations
    #[clap(aliases = &["ctx"])]
    Context {
        #[command(subcommand)]
        opt: ContextOperation,
    },
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum ModelsOperation {
    /// List standard models with their domain, task and framework
    #[clap(aliases = &["l", "ls"])]
    List {
        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum EndpointOperation {
    /// Show the current endpoint description
    #[clap(aliases = &["d", "get"])]
    Describe {
        /// Endpoint name (defaults to the context's default endpoint)
        endpoint: Option<String>,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Block while the endpoint is being created
    #[clap(aliases = &["wc"])]
    WaitCreate {
        endpoint: Option<String>,
        #[clap(flatten)]
        wait: WaitArgs,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Block until an update settles on InService or Failed
    #[clap(aliases = &["wu"])]
    WaitUpdate {
        endpoint: Option<String>,
        #[clap(flatten)]
        wait: WaitArgs,
    },
}

#[derive(clap::Args, Clone, Debug)]
pub struct WaitArgs {
    /// Seconds between status checks (defaults to 15 for creation, 5 for updates)
    #[arg(long)]
    pub interval_secs: Option<u64>,
    /// Give up after this many seconds; 0 waits forever
    #[arg(long, default_value_t = 3600)]
    pub timeout_secs: u64,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum TrafficOperation {
    /// Send JSON payloads to one variant and print each prediction
    #[clap(aliases = &["s"])]
    Single {
        endpoint: String,
        variant: String,
        /// JSON array of payloads, from a file or '-' for stdin
        #[arg(short, long)]
        payloads: FileOrStdin,
        #[arg(long, default_value_t = crate::traffic::SINGLE_SENTENCE_DELAY.as_millis() as u64)]
        delay_ms: u64,
    },
    /// Send every row of the payload file once
    #[clap(aliases = &["r"])]
    Replay {
        endpoint: Option<String>,
        #[arg(short, long, default_value = crate::traffic::DEFAULT_PAYLOAD_FILE)]
        file: PathBuf,
        #[arg(long, default_value_t = crate::traffic::REPLAY_DELAY.as_millis() as u64)]
        delay_ms: u64,
    },
    /// Replay the payload file until an invocation budget is used up
    #[clap(aliases = &["b"])]
    Bounded {
        endpoint: Option<String>,
        #[arg(short, long, default_value = crate::traffic::DEFAULT_PAYLOAD_FILE)]
        file: PathBuf,
        #[arg(short, long, default_value_t = 100)]
        max_invocations: u64,
        #[arg(long, default_value_t = 1000)]
        wait_interval_ms: u64,
        /// Stop at the first failed invocation
        #[arg(long)]
        raise_on_error: bool,
        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Clone, Debug)]
pub struct WindowArgs {
    /// Length of the trailing window in minutes
    #[arg(long, default_value_t = crate::metrics::DEFAULT_WINDOW_MINUTES)]
    pub minutes: i64,
    /// Explicit window start (RFC 3339); overrides --minutes
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,
    /// Print a text bar chart instead of a table
    #[arg(long)]
    pub chart: bool,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum MetricsOperation {
    /// Per-minute invocation counts of two variants side by side
    #[clap(aliases = &["inv", "i"])]
    Invocations {
        endpoint: String,
        variant1: String,
        variant2: String,
        #[clap(flatten)]
        window: WindowArgs,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// One metric of one variant
    #[clap(aliases = &["q"])]
    Query {
        endpoint: String,
        variant: String,
        #[arg(long)]
        metric: String,
        #[arg(long, default_value = "Average")]
        statistic: Statistic,
        /// Restrict to one endpoint config
        #[arg(long)]
        config_name: Option<String>,
        #[clap(flatten)]
        window: WindowArgs,
        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum AlarmOperation {
    /// Register (or replace) an auto-rollback alarm for a variant
    #[clap(aliases = &["c", "put"])]
    Create {
        alarm_name: String,
        endpoint: String,
        variant: String,
        #[arg(long)]
        metric: String,
        #[arg(long, default_value = "Sum")]
        statistic: Statistic,
        #[arg(long)]
        threshold: f64,
        #[clap(flatten)]
        output: OutputArgs,
    },
}

/// Context management operations
#[derive(clap::Subcommand, Clone, Debug)]
pub enum ContextOperation {
    /// Configure service URLs of a context
    #[clap(aliases = &["s", "update"])]
    Set {
        /// Context name (defaults to current)
        name: Option<String>,
        #[arg(long)]
        control_url: Option<String>,
        #[arg(long)]
        runtime_url: Option<String>,
        #[arg(long)]
        metrics_url: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
        /// Endpoint used when a command is given none
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Display the whole configuration
    #[clap(aliases = &["g", "show"])]
    Get,
    /// List context names, marking the current one
    #[clap(aliases = &["l", "ls"])]
    List,
    /// Switch the current context
    #[clap(aliases = &["use"])]
    Select { name: String },
}

/// Output formats
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn bounded_traffic_defaults() {
        let cli = MlepCli::try_parse_from(["mlep", "traffic", "bounded", "ep"]).unwrap();
        match cli.command {
            MlepCommands::Traffic {
                opt:
                    TrafficOperation::Bounded {
                        endpoint,
                        file,
                        max_invocations,
                        wait_interval_ms,
                        raise_on_error,
                        ..
                    },
            } => {
                assert_eq!(endpoint.as_deref(), Some("ep"));
                assert_eq!(file, PathBuf::from("../sample_payload/batch_data.csv"));
                assert_eq!(max_invocations, 100);
                assert_eq!(wait_interval_ms, 1000);
                assert!(!raise_on_error);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn statistic_is_parsed_by_name() {
        let cli = MlepCli::try_parse_from([
            "mlep", "met", "q", "ep", "AllTraffic", "--metric", "ModelLatency",
            "--statistic", "Maximum",
        ])
        .unwrap();
        let MlepCommands::Metrics {
            opt: MetricsOperation::Query { statistic, window, .. },
        } = cli.command
        else {
            panic!("expected metrics query");
        };
        assert_eq!(statistic, Statistic::Maximum);
        assert_eq!(window.minutes, 60);
        assert!(window.start.is_none());
    }

    #[test]
    fn unknown_statistic_is_rejected() {
        let result = MlepCli::try_parse_from([
            "mlep", "alarm", "create", "a", "ep", "v", "--metric", "m",
            "--statistic", "Median", "--threshold", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn wait_timeout_defaults_to_one_hour() {
        let cli = MlepCli::try_parse_from(["mlep", "endpoint", "wait-create", "ep"]).unwrap();
        let MlepCommands::Endpoint {
            opt: EndpointOperation::WaitCreate { wait, .. },
        } = cli.command
        else {
            panic!("expected wait-create");
        };
        assert_eq!(wait.timeout_secs, 3600);
        assert!(wait.interval_secs.is_none());
    }
}
