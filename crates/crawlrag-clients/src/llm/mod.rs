pub mod mock;
pub mod traits;
pub mod types;

pub use mock::MockLlmClient;
pub use traits::LlmClient;
pub use types::{
    ChatChoice, ChatCompletion, ChatMessage, ChatRequest, ChatRole, Embedding, EmbeddingRequest,
    EmbeddingResponse,
};
