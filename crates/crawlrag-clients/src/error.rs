//! Error types for collaborator clients

crawlrag_common::define_error_enum! {
    /// Errors surfaced by the database, LLM, crawler and pool clients
    pub enum ClientError {
        /// Table access or RPC failed
        #[error("Database error: {0}")]
        Database(String),

        /// Embedding or chat completion request failed
        #[error("LLM error: {0}")]
        Llm(String),

        /// Page crawl or crawler shutdown failed
        #[error("Crawl error: {0}")]
        Crawl(String),

        /// Connection acquisition or statement execution failed
        #[error("Connection pool error: {0}")]
        Pool(String),
    }
}

crawlrag_common::impl_common_conversions!(ClientError, with_serde);

/// Result type alias for client operations
pub type ClientResult<T> = Result<T>;
