//! Mock implementation of `Crawler` for testing

use super::traits::Crawler;
use super::types::CrawlResult;
use crate::stub::Stub;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;

pub const MOCK_MARKDOWN: &str = "# Test Content";
pub const MOCK_CLEANED_HTML: &str = "<h1>Test Content</h1>";
pub const MOCK_EXTRACTED_CONTENT: &str = "Test Content";

/// Crawler returning the same successful page for every URL
#[derive(Debug)]
pub struct MockCrawler {
    /// Keyed by the requested URL
    pub run: Stub<String, CrawlResult>,
    pub close: Stub<(), ()>,
}

impl MockCrawler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The successful page every URL yields by default
    pub fn canned_result() -> CrawlResult {
        CrawlResult {
            success: true,
            markdown: MOCK_MARKDOWN.to_string(),
            cleaned_html: MOCK_CLEANED_HTML.to_string(),
            extracted_content: Some(MOCK_EXTRACTED_CONTENT.to_string()),
            ..CrawlResult::default()
        }
    }

    /// URLs crawled so far, in call order
    pub fn crawled_urls(&self) -> Vec<String> {
        self.run.calls()
    }

    /// Whether `close` has been called at least once
    pub fn closed(&self) -> bool {
        self.close.call_count() > 0
    }
}

impl Default for MockCrawler {
    fn default() -> Self {
        Self {
            run: Stub::new("crawler.run", Self::canned_result()),
            close: Stub::new("crawler.close", ()),
        }
    }
}

#[async_trait]
impl Crawler for MockCrawler {
    async fn run(&self, url: &str) -> ClientResult<CrawlResult> {
        self.run.invoke(url.to_string(), ClientError::Crawl).await
    }

    async fn close(&self) -> ClientResult<()> {
        self.close.invoke((), ClientError::Crawl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_url_yields_canned_page() {
        let crawler = MockCrawler::new();

        let first = crawler.run("https://example.com/a").await.unwrap();
        let second = crawler.run("https://example.com/b").await.unwrap();

        assert!(first.success);
        assert_eq!(first.markdown, MOCK_MARKDOWN);
        assert_eq!(first, second);
        assert_eq!(
            crawler.crawled_urls(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[tokio::test]
    async fn test_per_url_results_via_handler() {
        let crawler = MockCrawler::new();
        crawler.run.responds_with(|url: &String| {
            if url.ends_with("/missing") {
                Ok(CrawlResult::failed("404"))
            } else {
                Ok(MockCrawler::canned_result())
            }
        });

        let missing = crawler.run("https://example.com/missing").await.unwrap();
        let found = crawler.run("https://example.com/").await.unwrap();

        assert!(!missing.success);
        assert!(found.success);
    }

    #[tokio::test]
    async fn test_close_is_recorded() {
        let crawler = MockCrawler::new();
        assert!(!crawler.closed());

        crawler.close().await.unwrap();

        assert!(crawler.closed());
    }

    #[tokio::test]
    async fn test_crawler_failure_surfaces_as_crawl_error() {
        let crawler = MockCrawler::new();
        crawler.run.fails_with("browser crashed");

        let result = crawler.run("https://example.com").await;

        assert!(matches!(result, Err(ClientError::Crawl(ref msg)) if msg == "browser crashed"));
    }
}
