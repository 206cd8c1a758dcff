//! End-to-end pipeline test: sitemap discovery through chunk storage,
//! with HTTP boundaries mocked and deterministic model backends.

use std::sync::Arc;

use docsift_ingest::{
    sitemap, ChunkEnricher, CrawlCoordinator, DocumentIngestor, HttpRenderer, MemoryChunkStore,
};
use docsift_llm::MockBackend;
use httpmock::prelude::*;

const PAGE_A: &str = r#"<html><body>
<h1>Getting started</h1>
<p>Install the tool and run it. The quickstart covers the basics.</p>
</body></html>"#;

const PAGE_B: &str = r#"<html><body>
<h1>Configuration</h1>
<p>Every option can be set from the environment.</p>
</body></html>"#;

#[tokio::test]
async fn sitemap_to_store_round_trip() {
    let server = MockServer::start();

    let sitemap_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset>
  <url><loc>{}</loc></url>
  <url><loc>{}</loc></url>
</urlset>"#,
        server.url("/a"),
        server.url("/b"),
    );

    server.mock(|when, then| {
        when.method(GET).path("/sitemap.xml");
        then.status(200).body(&sitemap_xml);
    });
    server.mock(|when, then| {
        when.method(GET).path("/a");
        then.status(200).body(PAGE_A);
    });
    server.mock(|when, then| {
        when.method(GET).path("/b");
        then.status(200).body(PAGE_B);
    });

    let client = reqwest::Client::new();
    let urls = sitemap::fetch_sitemap_urls(&client, &server.url("/sitemap.xml"))
        .await
        .unwrap();
    assert_eq!(urls.len(), 2);

    let enricher = ChunkEnricher::new(
        Arc::new(MockBackend::new(16)),
        Arc::new(MockBackend::new(16)),
        "mock-model",
        "docs",
    );
    let store = Arc::new(MemoryChunkStore::new());
    let ingestor = Arc::new(DocumentIngestor::new(
        enricher,
        store.clone(),
        "doc_chunks",
        5000,
    ));
    let renderer = Arc::new(HttpRenderer::new().unwrap());

    let coordinator = CrawlCoordinator::new(renderer, ingestor, 5);
    let stats = coordinator.crawl_all(&urls).await;

    assert_eq!(stats.pages, 2);
    assert_eq!(stats.ingested, 2);
    assert_eq!(stats.failed, 0);

    // One chunk per page, both numbered 0, rows keyed by their source URL
    let rows = store.rows();
    assert_eq!(rows.len(), 2);

    let mut seen_urls: Vec<String> = rows.iter().map(|(_, r)| r.url.clone()).collect();
    seen_urls.sort();
    let mut expected = vec![server.url("/a"), server.url("/b")];
    expected.sort();
    assert_eq!(seen_urls, expected);

    for (table, record) in &rows {
        assert_eq!(table, "doc_chunks");
        assert_eq!(record.chunk_number, 0);
        assert_eq!(record.embedding.len(), 16);
        assert_ne!(record.title, "Error processing title");
        assert_eq!(record.metadata["source"], "docs");
        assert!(!record.content.trim().is_empty());
    }
}

#[tokio::test]
async fn failed_page_does_not_block_siblings() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/ok");
        then.status(200).body(PAGE_A);
    });
    server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let enricher = ChunkEnricher::new(
        Arc::new(MockBackend::new(16)),
        Arc::new(MockBackend::new(16)),
        "mock-model",
        "docs",
    );
    let store = Arc::new(MemoryChunkStore::new());
    let ingestor = Arc::new(DocumentIngestor::new(
        enricher,
        store.clone(),
        "doc_chunks",
        5000,
    ));
    let renderer = Arc::new(HttpRenderer::new().unwrap());
    let coordinator = CrawlCoordinator::new(renderer, ingestor, 2);

    let urls = vec![server.url("/broken"), server.url("/ok")];
    let stats = coordinator.crawl_all(&urls).await;

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.ingested, 1);

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1.url, server.url("/ok"));
}
