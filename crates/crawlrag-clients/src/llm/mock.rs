//! Mock implementation of `LlmClient` for testing

use super::traits::LlmClient;
use super::types::{
    ChatChoice, ChatCompletion, ChatMessage, ChatRequest, Embedding, EmbeddingRequest,
    EmbeddingResponse,
};
use crate::stub::Stub;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use crawlrag_config::{DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_EMBEDDING_MODEL, DEFAULT_MODEL_CHOICE};

/// Value filling every component of the canned embedding
pub const MOCK_EMBEDDING_VALUE: f32 = 0.1;

/// Content of the canned chat reply
pub const MOCK_CHAT_RESPONSE: &str = "Test response";

/// LLM client answering with a constant embedding and a fixed chat reply
///
/// The canned embedding envelope holds a single vector regardless of how many
/// inputs were sent; use `embeddings.responds_with` for per-input vectors.
#[derive(Debug)]
pub struct MockLlmClient {
    pub embeddings: Stub<EmbeddingRequest, EmbeddingResponse>,
    pub chat: Stub<ChatRequest, ChatCompletion>,
}

impl MockLlmClient {
    /// Create a mock producing `dimensions`-long embeddings
    pub fn new(dimensions: usize) -> Self {
        Self {
            embeddings: Stub::new(
                "llm.create_embeddings",
                Self::canned_embedding(dimensions),
            ),
            chat: Stub::new("llm.create_chat_completion", Self::canned_completion()),
        }
    }

    /// Envelope with one `[MOCK_EMBEDDING_VALUE; dimensions]` vector
    pub fn canned_embedding(dimensions: usize) -> EmbeddingResponse {
        EmbeddingResponse {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            data: vec![Embedding {
                index: 0,
                embedding: vec![MOCK_EMBEDDING_VALUE; dimensions],
            }],
        }
    }

    /// Completion with one assistant choice reading [`MOCK_CHAT_RESPONSE`]
    pub fn canned_completion() -> ChatCompletion {
        ChatCompletion {
            model: DEFAULT_MODEL_CHOICE.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(MOCK_CHAT_RESPONSE),
                finish_reason: Some("stop".to_string()),
            }],
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIMENSIONS)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> ClientResult<EmbeddingResponse> {
        self.embeddings.invoke(request, ClientError::Llm).await
    }

    async fn create_chat_completion(&self, request: ChatRequest) -> ClientResult<ChatCompletion> {
        self.chat.invoke(request, ClientError::Llm).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_embedding_has_requested_dimensions() {
        let client = MockLlmClient::new(8);

        let response = client
            .create_embeddings(EmbeddingRequest::new("m", vec!["a".into(), "b".into()]))
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.first().unwrap(), &[MOCK_EMBEDDING_VALUE; 8]);
    }

    #[tokio::test]
    async fn test_per_input_vectors_via_handler() {
        let client = MockLlmClient::default();
        client.embeddings.responds_with(|request: &EmbeddingRequest| {
            Ok(EmbeddingResponse {
                model: request.model.clone(),
                data: (0..request.input.len())
                    .map(|index| Embedding {
                        index,
                        embedding: vec![0.0; 4],
                    })
                    .collect(),
            })
        });

        let vectors = client
            .create_embeddings(EmbeddingRequest::new("m", vec!["a".into(), "b".into()]))
            .await
            .unwrap()
            .into_vectors();

        assert_eq!(vectors.len(), 2);
    }

    #[tokio::test]
    async fn test_chat_failure_surfaces_as_llm_error() {
        let client = MockLlmClient::default();
        client.chat.fails_next("context length exceeded");

        let request = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::user("summarize")]);
        let first = client.create_chat_completion(request.clone()).await;
        let second = client.create_chat_completion(request).await;

        assert!(matches!(first, Err(ClientError::Llm(_))));
        assert_eq!(second.unwrap().first_content(), Some(MOCK_CHAT_RESPONSE));
        assert_eq!(client.chat.call_count(), 2);
    }
}
