//! Fixture contract tests
//!
//! Exercise each fixture the way a pipeline test would: through the
//! collaborator traits, holding mocks as `Arc<dyn Trait>` where possible.

use crawlrag_clients::{
    ChatMessage, ChatRequest, ClientError, ConnectionPool, Crawler, DatabaseClient,
    DatabaseClientExt, EmbeddingRequest, LlmClient,
};
use crawlrag_config::{EmbeddingServiceType, Settings, Transport};
use crawlrag_test_utils::{
    async_iterator, init_test_tracing, mock_crawler, mock_database_client, mock_llm_client,
    mock_postgres_pool, sample_code_example, sample_document, test_settings, test_settings_with,
};
use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use tokio_test::{assert_pending, assert_ready_ok};

#[test]
fn test_settings_literals() {
    let expected = Settings {
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
    };

    assert_eq!(test_settings(), expected);
}

#[test]
fn test_settings_wire_names() {
    let wire = serde_json::to_value(test_settings()).unwrap();
    let keys = wire.as_object().unwrap();

    assert_eq!(keys.len(), 38);
    assert_eq!(wire["transport"], "sse");
    assert_eq!(wire["embedding_service_type"], "openai");
    assert_eq!(wire["embedding_chars_per_token"], 4.0);
    assert!(wire["cross_encoder_model_local_path"].is_null());
}

#[test]
fn test_settings_are_independent_per_call() {
    let mut first = test_settings();
    first.use_agentic_rag = true;

    assert!(!test_settings().use_agentic_rag);
}

#[test]
fn test_settings_connection_string_hides_password() {
    let safe = test_settings().safe_connection_string();

    assert!(safe.contains("test_crawl4ai_rag"));
    assert!(!safe.contains("test_password"));
}

#[test]
fn test_settings_with_rejects_missing_embedding_credentials() {
    let result = test_settings_with(|s| {
        s.openai_api_key.clear();
        s.embedding_api_key = None;
    });

    assert!(result.is_err());
}

#[test]
fn test_mock_instances_are_distinct() {
    assert!(!Arc::ptr_eq(&mock_database_client(), &mock_database_client()));
    assert!(!Arc::ptr_eq(&mock_llm_client(), &mock_llm_client()));
    assert!(!Arc::ptr_eq(&mock_crawler(), &mock_crawler()));
    assert!(!Arc::ptr_eq(&mock_postgres_pool(), &mock_postgres_pool()));
}

#[tokio::test]
async fn test_database_queries_resolve_empty() {
    init_test_tracing();
    let mock = mock_database_client();
    let client: Arc<dyn DatabaseClient> = mock.clone();

    let inserted = client
        .table("crawled_pages")
        .insert(json!([sample_document().to_row().unwrap()]))
        .execute()
        .await
        .unwrap();
    let matched = client
        .rpc("match_crawled_pages", json!({"match_count": 5}))
        .execute()
        .await
        .unwrap();

    assert!(inserted.is_empty());
    assert!(matched.is_empty());
    assert_eq!(mock.insert.call_count(), 1);
    assert_eq!(mock.rpc.call_count(), 1);
}

#[tokio::test]
async fn test_embedding_has_1536_values() {
    let llm: Arc<dyn LlmClient> = mock_llm_client();

    let response = llm
        .create_embeddings(EmbeddingRequest::new(
            "text-embedding-3-small",
            vec!["hello".to_string()],
        ))
        .await
        .unwrap();

    let vector = response.first().unwrap();
    assert_eq!(vector.len(), 1536);
    assert!(vector.iter().all(|v| (v - 0.1).abs() < f32::EPSILON));
}

#[tokio::test]
async fn test_chat_completion_has_one_choice() {
    let llm: Arc<dyn LlmClient> = mock_llm_client();

    let completion = llm
        .create_chat_completion(ChatRequest::new(
            "gpt-4o-mini",
            vec![
                ChatMessage::system("You summarize code."),
                ChatMessage::user(sample_code_example().code),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(completion.choices.len(), 1);
    assert_eq!(completion.first_content(), Some("Test response"));
}

#[tokio::test]
async fn test_crawl_result_is_successful_and_bare() {
    let crawler = mock_crawler();

    let result = crawler.run("https://example.com").await.unwrap();
    crawler.close().await.unwrap();

    assert!(result.success);
    assert_eq!(result.markdown, "# Test Content");
    assert_eq!(result.cleaned_html, "<h1>Test Content</h1>");
    assert_eq!(result.extracted_content.as_deref(), Some("Test Content"));
    assert!(result.links.is_empty());
    assert!(result.media.is_empty());
    assert!(result.metadata.is_empty());
    assert!(result.screenshot.is_none());
    assert!(result.error_message.is_none());
    assert!(crawler.closed());
}

#[tokio::test]
async fn test_pool_yields_same_connection() {
    let pool = mock_postgres_pool();

    let first = pool.acquire().await.unwrap();
    let second = pool.acquire().await.unwrap();

    assert!(first.shares_connection_with(pool.connection()));
    assert!(second.shares_connection_with(pool.connection()));
    assert!(first.fetch_row("SELECT 1", &[]).await.unwrap().is_none());
    assert!(second.fetch("SELECT 1", &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pool_release_on_early_return() {
    async fn store(pool: &dyn ConnectionPool) -> Result<(), ClientError> {
        let conn = pool.acquire().await?;
        conn.execute("DELETE FROM crawled_pages WHERE url = $1", &[json!("x")])
            .await?;
        conn.execute("INSERT INTO crawled_pages VALUES ($1)", &[json!("x")])
            .await?;
        Ok(())
    }

    let pool = mock_postgres_pool();
    pool.connection().execute.fails_next("connection reset");

    assert!(store(pool.as_ref()).await.is_err());
    assert_eq!(pool.released_count(), 1);

    assert!(store(pool.as_ref()).await.is_ok());
    assert_eq!(pool.released_count(), 2);
    assert_eq!(pool.connection().execute.call_count(), 3);
}

#[tokio::test]
async fn test_fails_next_fails_exactly_once() {
    let crawler = mock_crawler();
    crawler.run.fails_next("navigation timeout");

    assert!(crawler.run("https://example.com/a").await.is_err());
    assert!(crawler.run("https://example.com/a").await.is_ok());
}

#[test]
fn test_mock_operations_suspend() {
    let llm = mock_llm_client();
    let mut call = tokio_test::task::spawn(
        llm.create_embeddings(EmbeddingRequest::new("m", vec!["x".to_string()])),
    );

    assert_pending!(call.poll());
    assert!(call.is_woken());
    assert_eq!(assert_ready_ok!(call.poll()).data.len(), 1);
}

#[tokio::test]
async fn test_async_iterator_yields_then_terminates() {
    let mut stream = async_iterator(vec![1, 2, 3]);

    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));
    assert_eq!(stream.next().await, Some(3));
    assert_eq!(stream.next().await, None);
}

#[test]
fn test_sample_records() {
    let doc = sample_document();
    let example = sample_code_example();

    assert_eq!(doc.url, "https://example.com/test");
    assert_eq!(doc.word_count, doc.content.split_whitespace().count());
    assert_eq!(doc.metadata.title, "Test Page");
    assert_eq!(example.language, "python");
    assert!(example.code.starts_with("def hello():"));
}
