//! Page rendering.
//!
//! The crawl coordinator owns one rendering session for the whole batch;
//! every URL task opens its own independent request within it. The seam is
//! a trait so tests substitute stub renderers.

use docsift_core::{AppError, AppResult};
use std::time::Duration;

/// User agent sent with page requests. Some documentation hosts serve
/// reduced markup to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Trait for page renderers.
///
/// `render` must support concurrent calls under one shared session.
#[async_trait::async_trait]
pub trait PageRenderer: Send + Sync {
    /// Fetch and return the rendered HTML for a URL.
    async fn render(&self, url: &str) -> AppResult<String>;

    /// Tear down the rendering session. Called once per batch, after the
    /// last URL task has finished.
    async fn close(&self) {}
}

/// HTTP page renderer over a single shared client session.
pub struct HttpRenderer {
    client: reqwest::Client,
}

impl HttpRenderer {
    /// Create a renderer with its own client session.
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Crawl(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Crawl(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Crawl(format!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Crawl(format!("Failed to read body of {}: {}", url, e)))
    }

    async fn close(&self) {
        // The underlying connection pool is released when the client drops;
        // nothing to flush for plain HTTP sessions.
        tracing::debug!("Closing render session");
    }
}
