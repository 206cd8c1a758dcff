//! Batch crawling under a global concurrency ceiling.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::htmltext::html_to_text;
use crate::ingestor::DocumentIngestor;
use crate::render::PageRenderer;
use crate::types::{CrawlStats, DocumentStats};

/// Outcome of one URL task.
enum UrlOutcome {
    Ingested(DocumentStats),
    Skipped,
    Failed,
}

/// Dispatches one task per URL, gated by a counting semaphore, and owns the
/// rendering session for the batch.
///
/// Every per-URL failure is caught and logged at the task boundary: the
/// batch completes even when every individual URL fails, and `crawl_all`
/// never returns an error. The render session is closed after the last
/// task finishes, on every path.
pub struct CrawlCoordinator {
    renderer: Arc<dyn PageRenderer>,
    ingestor: Arc<DocumentIngestor>,
    concurrency: usize,
}

impl CrawlCoordinator {
    /// Create a coordinator with the given concurrency ceiling.
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        ingestor: Arc<DocumentIngestor>,
        concurrency: usize,
    ) -> Self {
        Self {
            renderer,
            ingestor,
            concurrency,
        }
    }

    /// Crawl every URL and return once all dispatched tasks have finished.
    pub async fn crawl_all(&self, urls: &[String]) -> CrawlStats {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let mut tasks = Vec::with_capacity(urls.len());
        for url in urls {
            let url = url.clone();
            let renderer = Arc::clone(&self.renderer);
            let ingestor = Arc::clone(&self.ingestor);
            let semaphore = Arc::clone(&semaphore);

            tasks.push(tokio::spawn(async move {
                // Holds the slot for the whole URL task; released on drop
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore closed while tasks are running");

                info!("Crawling {}", url);

                let html = match renderer.render(&url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!("Error processing {}: {}", url, e);
                        return UrlOutcome::Failed;
                    }
                };

                let text = html_to_text(&html);
                if text.trim().is_empty() {
                    warn!("No text content for {}", url);
                    return UrlOutcome::Skipped;
                }

                UrlOutcome::Ingested(ingestor.ingest(&url, &text).await)
            }));
        }

        let mut stats = CrawlStats {
            pages: urls.len(),
            ..Default::default()
        };

        for task in tasks {
            match task.await {
                Ok(UrlOutcome::Ingested(_)) => stats.ingested += 1,
                Ok(UrlOutcome::Skipped) => stats.skipped += 1,
                Ok(UrlOutcome::Failed) => stats.failed += 1,
                Err(e) => {
                    error!("URL task aborted: {}", e);
                    stats.failed += 1;
                }
            }
        }

        self.renderer.close().await;
        stats
    }
}
