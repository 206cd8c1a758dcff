//! Completion and embedding backends for docsift.
//!
//! This crate provides provider-agnostic abstractions for the two model
//! backends the ingestion pipeline talks to: a completion backend that
//! derives structured title/summary objects, and an embedding backend that
//! produces fixed-dimension vectors.
//!
//! # Providers
//! - **openai**: any OpenAI-compatible HTTP API (default)
//! - **mock**: deterministic offline backend for tests and dry runs
//!
//! # Example
//! ```no_run
//! use docsift_llm::{ChatRequest, factory::create_completion};
//!
//! # async fn example() -> Result<(), docsift_core::AppError> {
//! let client = create_completion("openai", None, std::env::var("OPENAI_API_KEY").ok())?;
//! let request = ChatRequest::new("Hello, world!", "gpt-4o-mini");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod embedding;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{ChatRequest, ChatResponse, CompletionBackend};
pub use embedding::EmbeddingBackend;
pub use factory::{create_completion, create_embedder};
pub use providers::{MockBackend, OpenAiClient, OpenAiEmbedder};
