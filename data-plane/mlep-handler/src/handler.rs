use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::{get, post},
};

use crate::content::ContentType;
use crate::error::HandlerError;
use crate::pipeline::{InferenceHandler, LabelScore, Pipeline};

/// Hosting-runtime surface: `GET /ping` and `POST /invocations`.
pub fn build_router<P: Pipeline>(handler: InferenceHandler<P>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/invocations", post(invoke::<P>))
        .with_state(handler)
}

async fn ping() -> StatusCode {
    StatusCode::OK
}

async fn invoke<P: Pipeline>(
    State(handler): State<InferenceHandler<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<Vec<LabelScore>>>, HandlerError> {
    // A request without a content type is treated as CSV
    let content_type = match headers.get(CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map_err(|_| HandlerError::UnsupportedContentType(format!("{value:?}")))?
            .parse()?,
        None => ContentType::Csv,
    };
    let predictions = handler.handle(body, content_type).await.inspect_err(|e| {
        tracing::warn!(error = %e, "invocation failed");
    })?;
    Ok(Json(predictions))
}
