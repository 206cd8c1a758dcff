//! Completion backend abstraction and request/response types.
//!
//! This module defines the core abstractions for deriving text from a
//! completion backend. Providers are swappable behind the
//! [`CompletionBackend`] trait so tests can substitute stubs.

use docsift_core::AppResult;
use serde::{Deserialize, Serialize};

/// Completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user content to send
    pub user: String,

    /// Model identifier (e.g., "gpt-4o-mini")
    pub model: String,

    /// System instruction (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Ask the backend to respond with a single JSON object
    #[serde(default)]
    pub json_object: bool,
}

impl ChatRequest {
    /// Create a new completion request with required fields.
    pub fn new(user: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            model: model.into(),
            system: None,
            json_object: false,
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Request a structured JSON-object response.
    pub fn with_json_object(mut self) -> Self {
        self.json_object = true;
        self
    }
}

/// Completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,
}

/// Trait for completion backends.
///
/// This trait abstracts the underlying provider (OpenAI-compatible APIs,
/// offline mock, etc.) and provides a unified interface for completions.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Get the provider name (e.g., "openai", "mock").
    fn provider_name(&self) -> &str;

    /// Perform a completion.
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;
}
