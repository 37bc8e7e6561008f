use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::content::{ContentType, input_fn};
use crate::error::{BoxError, HandlerError};

/// One class score of a classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// A loaded model. Returns every label's score for each input, in input
/// order.
pub trait Pipeline: Send + Sync + 'static {
    fn predict(&self, inputs: &Value) -> Result<Vec<Vec<LabelScore>>, BoxError>;
}

/// Builds a [`Pipeline`] from the unpacked model artifacts.
pub trait PipelineLoader {
    type Pipeline: Pipeline;

    fn load(&self, model_dir: &Path) -> Result<Self::Pipeline, BoxError>;
}

/// Decodes requests and runs them through the loaded pipeline.
pub struct InferenceHandler<P> {
    pipeline: Arc<P>,
}

impl<P> Clone for InferenceHandler<P> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<P: Pipeline> InferenceHandler<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn load<L>(loader: &L, model_dir: &Path) -> Result<Self, HandlerError>
    where
        L: PipelineLoader<Pipeline = P>,
    {
        let pipeline = loader.load(model_dir).map_err(|e| HandlerError::ModelLoad {
            dir: model_dir.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(pipeline))
    }

    /// Parse then predict. Prediction runs on the blocking pool.
    pub async fn handle(
        &self,
        body: Bytes,
        content_type: ContentType,
    ) -> Result<Vec<Vec<LabelScore>>, HandlerError> {
        let inputs = input_fn(&body, content_type)?;
        debug!(%content_type, "input decoded");
        let pipeline = self.pipeline.clone();
        tokio::task::spawn_blocking(move || pipeline.predict(&inputs))
            .await
            .map_err(|e| HandlerError::Pipeline(e.to_string()))?
            .map_err(|e| HandlerError::Pipeline(e.to_string()))
    }
}
