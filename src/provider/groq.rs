// file: src/provider/groq.rs
// description: Groq chat-completions client over the OpenAI-compatible API
// reference: https://console.groq.com/docs/api-reference

use crate::error::{PipelineError, Result};
use crate::models::payload::RawModelResponse;
use crate::provider::{CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct GroqChatClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqChatClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for GroqChatClient {
    async fn invoke(&self, request: &CompletionRequest) -> Result<RawModelResponse> {
        let body = ChatRequest {
            model: request.generation.model.clone(),
            temperature: request.generation.temperature,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        };

        debug!(
            "requesting completion from {} ({} prompt chars)",
            body.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Invocation(format!("failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Invocation(format!(
                "request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Invocation(format!("failed to parse response: {}", e)))?;

        match completion.choices.into_iter().next() {
            Some(choice) => {
                debug!("received {} completion chars", choice.message.content.len());
                Ok(RawModelResponse::Text(choice.message.content))
            }
            None => Err(PipelineError::Invocation(
                "no choices returned by completion endpoint".to_string(),
            )),
        }
    }
}
