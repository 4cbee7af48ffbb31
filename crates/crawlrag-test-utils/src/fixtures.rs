//! Settings and mock collaborator fixtures

use crawlrag_clients::{MockCrawler, MockDatabaseClient, MockLlmClient, MockPostgresPool};
use crawlrag_config::{ConfigResult, EmbeddingServiceType, Settings, Transport, Validate};
use std::sync::Arc;

/// Settings bundle with test credentials and production defaults
///
/// Both storage backends are filled in, so code under test can take either
/// path without extra setup.
pub fn test_settings() -> Settings {
    Settings {
        openai_api_key: "test-api-key".to_string(),
        openai_base_url: None,
        openai_organization: None,
        supabase_url: "https://test.supabase.co".to_string(),
        supabase_service_key: "test-service-key".to_string(),
        model_choice: "gpt-4o-mini".to_string(),
        summary_llm_model: "gpt-4o-mini".to_string(),
        use_contextual_embeddings: false,
        use_hybrid_search: false,
        use_reranking: false,
        use_agentic_rag: false,
        host: "0.0.0.0".to_string(),
        port: 8051,
        transport: Transport::Sse,
        embedding_model: "text-embedding-3-small".to_string(),
        embedding_dimensions: 1536,
        embedding_service_type: EmbeddingServiceType::OpenAi,
        embedding_api_key: Some("test-embedding-api-key".to_string()),
        custom_embedding_url: None,
        cross_encoder_model: "cross-encoder/ms-marco-MiniLM-L-6-v2".to_string(),
        custom_cross_encoder_url: None,
        cross_encoder_model_local_path: None,
        default_max_depth: 3,
        default_max_concurrent: 10,
        default_chunk_size: 5000,
        default_overlap: 200,
        default_num_results: 5,
        default_semantic_threshold: 0.5,
        default_rerank_threshold: 0.3,
        embedding_max_tokens: 8000,
        embedding_chars_per_token: 4.0,
        postgres_host: "localhost".to_string(),
        postgres_port: 5432,
        postgres_db: "test_crawl4ai_rag".to_string(),
        postgres_user: "test_user".to_string(),
        postgres_password: "test_password".to_string(),
        postgres_sslmode: "prefer".to_string(),
        disable_thinking: false,
    }
}

/// [`test_settings`] with caller overrides applied, then validated
///
/// # Errors
/// Returns the validation error when the overrides leave the settings in an
/// inconsistent state (e.g. overlap not smaller than chunk size).
pub fn test_settings_with<F>(overrides: F) -> ConfigResult<Settings>
where
    F: FnOnce(&mut Settings),
{
    let mut settings = test_settings();
    overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Database client whose every query resolves to an empty response
pub fn mock_database_client() -> Arc<MockDatabaseClient> {
    Arc::new(MockDatabaseClient::new())
}

/// LLM client returning one 1536-dimension embedding and a fixed chat reply
pub fn mock_llm_client() -> Arc<MockLlmClient> {
    Arc::new(MockLlmClient::default())
}

/// Crawler whose every run resolves to the same successful test page
pub fn mock_crawler() -> Arc<MockCrawler> {
    Arc::new(MockCrawler::new())
}

/// Pool that yields the same mock connection on every acquisition
pub fn mock_postgres_pool() -> Arc<MockPostgresPool> {
    Arc::new(MockPostgresPool::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawlrag_config::ConfigError;

    #[test]
    fn test_settings_pass_validation() {
        assert!(test_settings().validate().is_ok());
    }

    #[test]
    fn test_overrides_are_applied() {
        let settings = test_settings_with(|s| {
            s.use_hybrid_search = true;
            s.default_num_results = 10;
        })
        .unwrap();

        assert!(settings.use_hybrid_search);
        assert_eq!(settings.default_num_results, 10);
    }

    #[test]
    fn test_incompatible_overrides_fail() {
        let result = test_settings_with(|s| s.default_overlap = s.default_chunk_size);

        assert!(matches!(result, Err(ConfigError::Generic { .. })));
    }

    #[test]
    fn test_out_of_range_threshold_fails() {
        let result = test_settings_with(|s| s.default_semantic_threshold = 1.5);

        assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
    }
}
