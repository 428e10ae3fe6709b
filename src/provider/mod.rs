// file: src/provider/mod.rs
// description: completion provider seam and request types
// reference: internal provider abstraction

pub mod groq;

use crate::error::Result;
use crate::models::payload::RawModelResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Model selection for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f64,
}

impl GenerationConfig {
    pub fn new(model: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }
}

/// One prompt plus its generation settings.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub generation: GenerationConfig,
}

/// External completion service. The pipeline treats this as a black box:
/// it hands over a prompt and inspects only the returned text. Network
/// policy (timeouts, backoff) lives behind this seam, not in the pipeline.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn invoke(&self, request: &CompletionRequest) -> Result<RawModelResponse>;
}

pub use groq::GroqChatClient;
