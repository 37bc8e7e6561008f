use axum::response::IntoResponse;
use http::StatusCode;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    #[error("Requested unsupported ContentType in Accept: {0}")]
    UnsupportedContentType(String),
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Payload is not valid UTF-8")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    #[error("Failed to load model from {dir}: {reason}")]
    ModelLoad { dir: String, reason: String },
    #[error("Prediction failed: {0}")]
    Pipeline(String),
}

impl HandlerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidJson(_) | Self::InvalidEncoding(_) => StatusCode::BAD_REQUEST,
            Self::ModelLoad { .. } | Self::Pipeline(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedContentType(_) => "UNSUPPORTED_CONTENT_TYPE",
            Self::InvalidJson(_) => "INVALID_JSON",
            Self::InvalidEncoding(_) => "INVALID_ENCODING",
            Self::ModelLoad { .. } => "MODEL_LOAD_ERROR",
            Self::Pipeline(_) => "PIPELINE_ERROR",
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({
            "error": { "code": self.code(), "message": self.to_string() }
        });
        let mut resp = (self.status(), body.to_string()).into_response();
        resp.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        resp
    }
}
