//! Inference request handling for a hosted sentiment model.
//!
//! The model itself sits behind [`Pipeline`]; this crate owns request
//! decoding, error mapping and the HTTP surface the hosting runtime calls.

mod conf;
mod content;
mod error;
mod handler;
mod observability;
mod pipeline;

pub use conf::Config;
pub use content::{CSV_CONTENT_TYPE, ContentType, JSON_CONTENT_TYPE, input_fn};
pub use error::{BoxError, HandlerError};
pub use handler::build_router;
pub use observability::{TracingConfig, setup_tracing};
pub use pipeline::{InferenceHandler, LabelScore, Pipeline, PipelineLoader};

use std::future::Future;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Load the pipeline from `MODEL_DIR` and serve until Ctrl+C or SIGTERM.
pub async fn start_server<L: PipelineLoader>(
    config: Config,
    loader: L,
) -> Result<(), BoxError> {
    let tracing_config = TracingConfig::from_env("mlep-handler", config.json_logs());
    if let Err(e) = setup_tracing(&tracing_config) {
        eprintln!("tracing already initialized: {e}");
    }

    let handler = InferenceHandler::load(&loader, Path::new(&config.model_dir))?;
    info!(model_dir = %config.model_dir, "model loaded");
    let router = build_router(handler).layer(axum::extract::DefaultBodyLimit::max(
        config.max_payload_bytes,
    ));

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;
    info!("start server on port {:?}", config.http_port);
    serve(listener, router, shutdown_signal()).await
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
) -> Result<(), BoxError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
