//! Domain records stored by the crawl pipeline

use crate::ClientResult;
use serde::{Deserialize, Serialize};

/// Page-level metadata carried with every stored chunk
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub description: String,
}

/// One chunk of a crawled page, as written to the `crawled_pages` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledDocument {
    pub url: String,
    pub content: String,
    /// 1-based position of this chunk within the page
    pub chunk_number: u32,
    pub total_chunks: u32,
    pub word_count: usize,
    /// Source identifier, usually the host name
    pub source: String,
    pub metadata: DocumentMetadata,
}

impl CrawledDocument {
    /// Whitespace-delimited word count used for `word_count`
    pub fn count_words(text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// JSON row suitable for a table insert
    ///
    /// # Errors
    /// Returns `ClientError::Parse` if serialization fails
    pub fn to_row(&self) -> ClientResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Code snippet extracted from a crawled page, as written to `code_examples`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExample {
    pub code: String,
    /// Fence language tag, e.g. `python`
    pub language: String,
    /// Prose surrounding the snippet on the page
    pub context: String,
    pub summary: String,
    pub url: String,
    pub source: String,
}

impl CodeExample {
    /// JSON row suitable for a table insert
    ///
    /// # Errors
    /// Returns `ClientError::Parse` if serialization fails
    pub fn to_row(&self) -> ClientResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
