//! Collaborator interfaces for the crawlrag pipeline and their test doubles
//!
//! The crawler, the LLM provider, the Supabase-style database client and the
//! `PostgreSQL` connection pool are all reached through the traits in this
//! crate. Each trait ships with a `Mock*` implementation whose operations are
//! backed by a [`Stub`], so tests can swap in canned replies or failures
//! without touching the network.

pub mod crawler;
pub mod database;
pub mod error;
pub mod llm;
pub mod models;
pub mod postgres;
pub mod stub;

// Re-export main types
pub use crawler::{CrawlResult, Crawler, Link, LinkCollection, MediaCollection, MediaItem, MockCrawler};
pub use database::{
    DatabaseClient, DatabaseClientExt, Filter, MockDatabaseClient, PendingQuery, QueryOperation,
    QueryRequest, QueryResponse, TableRef,
};
pub use error::{ClientError, ClientResult};
pub use llm::{
    ChatChoice, ChatCompletion, ChatMessage, ChatRequest, ChatRole, Embedding, EmbeddingRequest,
    EmbeddingResponse, LlmClient, MockLlmClient,
};
pub use models::{CodeExample, CrawledDocument, DocumentMetadata};
pub use postgres::{
    BatchCall, Connection, ConnectionPool, MockConnection, MockPostgresPool, PooledConnection, Row,
    SqlCall,
};
pub use stub::Stub;
