//! Sitemap discovery.
//!
//! Fetches a sitemap XML document and extracts every `<loc>` URL. This is
//! the fatal tier of the pipeline: an unreachable sitemap or a non-200
//! response aborts the batch before any crawl work starts.

use docsift_core::{AppError, AppResult};
use tracing::info;

/// Fetch a sitemap and return the URLs it lists.
pub async fn fetch_sitemap_urls(client: &reqwest::Client, sitemap_url: &str) -> AppResult<Vec<String>> {
    info!("Fetching sitemap: {}", sitemap_url);

    let response = client
        .get(sitemap_url)
        .send()
        .await
        .map_err(|e| AppError::Crawl(format!("Failed to fetch sitemap: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Crawl(format!(
            "Failed to fetch sitemap: HTTP {}",
            response.status()
        )));
    }

    let xml = response
        .text()
        .await
        .map_err(|e| AppError::Crawl(format!("Failed to read sitemap body: {}", e)))?;

    let urls = parse_urlset(&xml)?;
    info!("Sitemap listed {} URLs", urls.len());
    Ok(urls)
}

/// Parse a urlset XML document and return all `<loc>` URLs.
pub fn parse_urlset(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut urls = Vec::new();
    let mut in_loc = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"loc" {
                    in_loc = true;
                }
            }
            Ok(quick_xml::events::Event::Text(e)) if in_loc => {
                let url = e
                    .unescape()
                    .map_err(|e| AppError::Crawl(format!("Malformed sitemap XML: {}", e)))?
                    .trim()
                    .to_string();
                if !url.is_empty() {
                    urls.push(url);
                }
            }
            Ok(quick_xml::events::Event::End(e)) => {
                if e.local_name().as_ref() == b"loc" {
                    in_loc = false;
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(AppError::Crawl(format!("Malformed sitemap XML: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(urls)
}
