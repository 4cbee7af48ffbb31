use super::types::CrawlResult;
use crate::ClientResult;
use async_trait::async_trait;

/// Web crawler that turns a URL into markdown plus page metadata
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Crawl a single page
    ///
    /// A page that loads but cannot be processed comes back as an
    /// unsuccessful [`CrawlResult`]; `Err` is reserved for crawler failures.
    async fn run(&self, url: &str) -> ClientResult<CrawlResult>;

    /// Release the browser and any other crawler resources
    async fn close(&self) -> ClientResult<()>;
}
