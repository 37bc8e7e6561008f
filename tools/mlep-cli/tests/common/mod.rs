//! In-process stand-in for the managed inference service.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tempfile::TempDir;

#[derive(Debug, Clone)]
pub struct Invocation {
    pub endpoint: String,
    pub content_type: String,
    pub target_variant: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct MockState {
    pub statuses: Mutex<VecDeque<&'static str>>,
    pub describes: Mutex<usize>,
    pub invocations: Mutex<Vec<Invocation>>,
    pub fail_rows: Vec<String>,
    /// Datapoints served per variant name.
    pub series: Vec<(String, Value)>,
    pub queries: Mutex<Vec<Value>>,
    pub alarms: Mutex<Vec<(String, Value)>>,
}

pub type Shared = Arc<MockState>;

async fn describe(
    State(state): State<Shared>,
    Path(name): Path<String>,
) -> Json<Value> {
    *state.describes.lock().unwrap() += 1;
    let status = state
        .statuses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or("InService");
    Json(json!({
        "EndpointName": name,
        "EndpointStatus": status,
        "EndpointConfigName": format!("{name}-config"),
    }))
}

async fn model_metadata() -> Json<Value> {
    Json(json!({
        "ModelMetadataSummaries": [{
            "Domain": "NATURAL_LANGUAGE_PROCESSING",
            "Framework": "PYTORCH",
            "FrameworkVersion": "1.13",
            "Task": "FILL_MASK",
            "Model": "bert-base-uncased",
        }]
    }))
}

async fn invoke(
    State(state): State<Shared>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<String, (StatusCode, String)> {
    let header = |key: &str| {
        headers
            .get(key)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.invocations.lock().unwrap().push(Invocation {
        endpoint: name,
        content_type: header("content-type").unwrap_or_default(),
        target_variant: header("x-target-variant"),
        body: body.clone(),
    });
    if state.fail_rows.contains(&body) {
        return Err((StatusCode::BAD_REQUEST, format!("cannot score {body}")));
    }
    Ok(format!("{{\"echo\":{}}}", body.len()))
}

async fn statistics(
    State(state): State<Shared>,
    Json(query): Json<Value>,
) -> Json<Value> {
    let variant = query["Dimensions"]
        .as_array()
        .and_then(|dims| {
            dims.iter()
                .find(|d| d["Name"] == "VariantName")
                .and_then(|d| d["Value"].as_str())
        })
        .unwrap_or_default()
        .to_string();
    state.queries.lock().unwrap().push(query.clone());
    let datapoints = state
        .series
        .iter()
        .find(|(v, _)| *v == variant)
        .map(|(_, d)| d.clone())
        .unwrap_or_else(|| json!([]));
    Json(json!({ "Label": query["MetricName"], "Datapoints": datapoints }))
}

async fn put_alarm(
    State(state): State<Shared>,
    Path(name): Path<String>,
    Json(alarm): Json<Value>,
) -> StatusCode {
    state.alarms.lock().unwrap().push((name, alarm));
    StatusCode::OK
}

pub async fn start_mock_service(state: MockState) -> anyhow::Result<(String, Shared)> {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/endpoints/{name}", get(describe))
        .route("/endpoints/{name}/invocations", post(invoke))
        .route("/model-metadata", get(model_metadata))
        .route("/metric-statistics", post(statistics))
        .route("/alarms/{name}", put(put_alarm))
        .with_state(state.clone());

    let listener =
        tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
            .await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock service error: {e}");
        }
    });
    Ok((format!("http://{}:{}", addr.ip(), addr.port()), state))
}

pub async fn write_cli_config(
    dir: &TempDir,
    base_url: &str,
) -> anyhow::Result<PathBuf> {
    let cfg = serde_yaml::to_string(&json!({
        "contexts": {
            "default": {
                "control_url": base_url,
                "runtime_url": base_url,
                "metrics_url": base_url,
                "metrics_namespace": null,
                "default_endpoint": "sentiment-ep",
            }
        },
        "current_context": "default"
    }))?;
    let path = dir.path().join("config.yml");
    tokio::fs::write(&path, cfg).await?;
    Ok(path)
}
