//! Command handlers for the docsift CLI.

pub mod crawl;

// Re-export command types for convenience
pub use crawl::CrawlCommand;
