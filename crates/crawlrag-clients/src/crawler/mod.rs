pub mod mock;
pub mod traits;
pub mod types;

pub use mock::MockCrawler;
pub use traits::Crawler;
pub use types::{CrawlResult, Link, LinkCollection, MediaCollection, MediaItem};
