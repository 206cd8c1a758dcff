//! OpenAI-compatible provider implementation.
//!
//! Talks to the `/chat/completions` and `/embeddings` endpoints of any
//! OpenAI-compatible API. Completions are requested in JSON-object mode
//! when the caller asks for a structured response.

use crate::client::{ChatRequest, ChatResponse, CompletionBackend};
use crate::embedding::EmbeddingBackend;
use docsift_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OpenAI chat completions request format.
#[derive(Debug, Serialize)]
struct CompletionsRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// OpenAI chat completions response format.
#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    model: String,
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenAI embeddings request format.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: String,
}

/// OpenAI embeddings response format.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

fn build_http_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Backend(format!("Failed to create HTTP client: {}", e)))
}

fn check_api_key(api_key: &Option<String>) -> AppResult<&str> {
    api_key
        .as_deref()
        .ok_or_else(|| AppError::Backend("OPENAI_API_KEY is not set".to_string()))
}

/// OpenAI-compatible completion client.
pub struct OpenAiClient {
    /// API base URL
    base_url: String,

    /// API key; calls fail when absent
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client against the default API base URL.
    pub fn new(api_key: Option<String>) -> AppResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> AppResult<Self> {
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client: build_http_client()?,
        })
    }

    fn to_completions_request(&self, request: &ChatRequest) -> CompletionsRequest {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(Message {
                role: "system",
                content: system.clone(),
            });
        }
        messages.push(Message {
            role: "user",
            content: request.user.clone(),
        });

        CompletionsRequest {
            model: request.model.clone(),
            messages,
            response_format: request.json_object.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let api_key = check_api_key(&self.api_key)?;
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.to_completions_request(request))
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Backend(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let body: CompletionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse completion response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Backend("Completion response had no choices".to_string()))?;

        Ok(ChatResponse {
            content,
            model: body.model,
        })
    }
}

/// OpenAI-compatible embedding client.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    /// API base URL
    base_url: String,

    /// API key; calls fail when absent
    api_key: Option<String>,

    /// Model name (e.g., "text-embedding-3-small")
    model: String,

    /// Expected embedding dimensions
    dimensions: usize,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiEmbedder {
    /// Create a new embedder against the default API base URL.
    pub fn new(api_key: Option<String>, model: impl Into<String>, dimensions: usize) -> AppResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model, dimensions)
    }

    /// Create a new embedder with a custom base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> AppResult<Self> {
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            dimensions,
            client: build_http_client()?,
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for OpenAiEmbedder {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let api_key = check_api_key(&self.api_key)?;
        let url = format!("{}/embeddings", self.base_url);

        tracing::debug!(model = %self.model, chars = text.len(), "Sending embedding request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&EmbeddingsRequest {
                model: self.model.clone(),
                input: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Backend(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse embedding response: {}", e)))?;

        let embedding = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| AppError::Backend("Embedding response had no data".to_string()))?;

        if embedding.len() != self.dimensions {
            return Err(AppError::Backend(format!(
                "Model '{}' returned {} dimensions, expected {}",
                self.model,
                embedding.len(),
                self.dimensions
            )));
        }

        Ok(embedding)
    }
}
