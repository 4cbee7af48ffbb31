//! Trait abstraction for the LLM provider

use super::types::{ChatCompletion, ChatRequest, EmbeddingRequest, EmbeddingResponse};
use crate::ClientResult;
use async_trait::async_trait;

/// Embedding and chat completion provider
///
/// Used for chunk embeddings, contextual-embedding prompts and code example
/// summaries. Both calls are network I/O in a real implementation.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Embed every input string, one vector per input
    async fn create_embeddings(&self, request: EmbeddingRequest)
    -> ClientResult<EmbeddingResponse>;

    /// Run one chat completion
    async fn create_chat_completion(&self, request: ChatRequest) -> ClientResult<ChatCompletion>;
}
