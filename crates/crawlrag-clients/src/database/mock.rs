//! Mock implementation of `DatabaseClient` for testing

use super::query::{QueryOperation, QueryRequest, QueryResponse};
use super::traits::DatabaseClient;
use crate::stub::Stub;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;

type QueryStub = Stub<QueryRequest, QueryResponse>;

/// Database client whose every operation answers with an empty response
///
/// Each operation kind has its own stub, so a test can, say, fail inserts
/// while selects keep returning rows.
#[derive(Debug)]
pub struct MockDatabaseClient {
    pub insert: QueryStub,
    pub select: QueryStub,
    pub update: QueryStub,
    pub delete: QueryStub,
    pub rpc: QueryStub,
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self {
            insert: Stub::new("database.insert", QueryResponse::empty()),
            select: Stub::new("database.select", QueryResponse::empty()),
            update: Stub::new("database.update", QueryResponse::empty()),
            delete: Stub::new("database.delete", QueryResponse::empty()),
            rpc: Stub::new("database.rpc", QueryResponse::empty()),
        }
    }
}

impl MockDatabaseClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub backing `operation`
    pub const fn stub(&self, operation: QueryOperation) -> &QueryStub {
        match operation {
            QueryOperation::Insert => &self.insert,
            QueryOperation::Select => &self.select,
            QueryOperation::Update => &self.update,
            QueryOperation::Delete => &self.delete,
            QueryOperation::Rpc => &self.rpc,
        }
    }

    /// Requests of every kind that targeted `table`
    pub fn requests_for(&self, table: &str) -> Vec<QueryRequest> {
        [
            &self.insert,
            &self.select,
            &self.update,
            &self.delete,
            &self.rpc,
        ]
        .into_iter()
        .flat_map(Stub::calls)
        .filter(|request| request.target == table)
        .collect()
    }

    /// Total calls across all operation kinds
    pub fn total_calls(&self) -> usize {
        [
            &self.insert,
            &self.select,
            &self.update,
            &self.delete,
            &self.rpc,
        ]
        .into_iter()
        .map(Stub::call_count)
        .sum()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute(&self, request: QueryRequest) -> ClientResult<QueryResponse> {
        self.stub(request.operation)
            .invoke(request, ClientError::Database)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseClientExt;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_every_operation_returns_empty_response() {
        let client = MockDatabaseClient::new();

        let responses = [
            client.table("crawled_pages").insert(json!([])).execute().await,
            client.table("crawled_pages").select("*").execute().await,
            client.table("sources").update(json!({"summary": "x"})).execute().await,
            client.table("crawled_pages").delete().execute().await,
            client.rpc("match_crawled_pages", json!({})).execute().await,
        ];

        for response in responses {
            assert!(response.unwrap().is_empty());
        }
        assert_eq!(client.total_calls(), 5);
    }

    #[tokio::test]
    async fn test_builder_records_full_request() {
        let client = MockDatabaseClient::new();

        client
            .table("crawled_pages")
            .delete()
            .eq("url", "https://example.com/test")
            .execute()
            .await
            .unwrap();

        let request = client.delete.last_call().unwrap();
        assert_eq!(request.operation, QueryOperation::Delete);
        assert_eq!(request.target, "crawled_pages");
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters[0].column, "url");
        assert_eq!(request.filters[0].value, json!("https://example.com/test"));
    }

    #[tokio::test]
    async fn test_rpc_carries_params() {
        let client = MockDatabaseClient::new();
        client.rpc.returns(QueryResponse::with_rows(vec![json!({"id": 1})]));

        let response = client
            .rpc("match_code_examples", json!({"match_count": 5}))
            .execute()
            .await
            .unwrap();

        assert_eq!(response.count, Some(1));
        assert_eq!(
            client.rpc.last_call().unwrap().payload,
            Some(json!({"match_count": 5}))
        );
    }

    #[tokio::test]
    async fn test_failures_are_per_operation() {
        let client = MockDatabaseClient::new();
        client.insert.fails_with("duplicate key");

        let insert = client.table("sources").insert(json!({})).execute().await;
        let select = client.table("sources").select("*").limit(1).execute().await;

        assert!(matches!(insert, Err(ClientError::Database(ref msg)) if msg == "duplicate key"));
        assert!(select.is_ok());
        assert_eq!(client.requests_for("sources").len(), 2);
    }

    #[tokio::test]
    async fn test_builders_work_through_trait_objects() {
        let client: Arc<dyn DatabaseClient> = Arc::new(MockDatabaseClient::new());

        let response = client.table("sources").select("source_id").execute().await;

        assert!(response.unwrap().is_empty());
    }
}
