//! Crawl result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image, video or audio reference found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCollection {
    #[serde(default)]
    pub images: Vec<MediaItem>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
    #[serde(default)]
    pub audios: Vec<MediaItem>,
}

impl MediaCollection {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty() && self.audios.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Links split by whether they stay on the crawled domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCollection {
    #[serde(default)]
    pub internal: Vec<Link>,
    #[serde(default)]
    pub external: Vec<Link>,
}

impl LinkCollection {
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Outcome of crawling one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub success: bool,
    pub markdown: String,
    pub cleaned_html: String,
    #[serde(default)]
    pub extracted_content: Option<String>,
    #[serde(default)]
    pub media: MediaCollection,
    #[serde(default)]
    pub links: LinkCollection,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl CrawlResult {
    /// Unsuccessful result carrying `message`
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}
