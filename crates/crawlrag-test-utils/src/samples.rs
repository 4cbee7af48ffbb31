//! Sample domain records

use crawlrag_clients::{CodeExample, CrawledDocument, DocumentMetadata};

const SAMPLE_CONTENT: &str = "This is test content for unit testing.";

/// A single-chunk page from `example.com`
pub fn sample_document() -> CrawledDocument {
    CrawledDocument {
        url: "https://example.com/test".to_string(),
        content: SAMPLE_CONTENT.to_string(),
        chunk_number: 1,
        total_chunks: 1,
        word_count: CrawledDocument::count_words(SAMPLE_CONTENT),
        source: "example.com".to_string(),
        metadata: DocumentMetadata {
            title: "Test Page".to_string(),
            description: "A test page for unit testing".to_string(),
        },
    }
}

/// A short Python snippet with its summary
pub fn sample_code_example() -> CodeExample {
    CodeExample {
        code: "def hello():\n    print('Hello, world!')".to_string(),
        language: "python".to_string(),
        context: "A simple hello world function".to_string(),
        summary: "Prints hello world".to_string(),
        url: "https://example.com/code".to_string(),
        source: "example.com".to_string(),
    }
}
