//! Backend factory.
//!
//! Maps a provider name from configuration to concrete completion and
//! embedding backend implementations.

use crate::client::CompletionBackend;
use crate::embedding::EmbeddingBackend;
use crate::providers::{MockBackend, OpenAiClient, OpenAiEmbedder};
use docsift_core::{AppError, AppResult};
use std::sync::Arc;

/// Create a completion backend for the given provider.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "mock")
/// * `base_url` - Optional custom API base URL
/// * `api_key` - Optional API key (calls on key-requiring providers fail
///   at request time when it is absent)
pub fn create_completion(
    provider: &str,
    base_url: Option<&str>,
    api_key: Option<String>,
) -> AppResult<Arc<dyn CompletionBackend>> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let client = match base_url {
                Some(url) => OpenAiClient::with_base_url(url, api_key)?,
                None => OpenAiClient::new(api_key)?,
            };
            Ok(Arc::new(client))
        }
        "mock" => Ok(Arc::new(MockBackend::new(0))),
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

/// Create an embedding backend for the given provider.
pub fn create_embedder(
    provider: &str,
    base_url: Option<&str>,
    api_key: Option<String>,
    model: &str,
    dimensions: usize,
) -> AppResult<Arc<dyn EmbeddingBackend>> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let embedder = match base_url {
                Some(url) => OpenAiEmbedder::with_base_url(url, api_key, model, dimensions)?,
                None => OpenAiEmbedder::new(api_key, model, dimensions)?,
            };
            Ok(Arc::new(embedder))
        }
        "mock" => Ok(Arc::new(MockBackend::new(dimensions))),
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_completion() {
        let client = create_completion("openai", None, Some("sk-test".to_string()));
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_openai_with_custom_endpoint() {
        let client = create_completion("openai", Some("http://localhost:8080/v1"), None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_mock_embedder() {
        let embedder = create_embedder("mock", None, None, "mock-hash-v1", 1536).unwrap();
        assert_eq!(embedder.dimensions(), 1536);
        assert_eq!(embedder.provider_name(), "mock");
    }

    #[test]
    fn test_unknown_provider() {
        match create_completion("unknown", None, None) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
