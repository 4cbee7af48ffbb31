//! Database client trait for dependency injection and testing

use super::query::{PendingQuery, QueryRequest, QueryResponse, TableRef};
use crate::ClientResult;
use async_trait::async_trait;
use serde_json::Value;

/// Supabase-style database client
///
/// Implementations only need to run a fully built [`QueryRequest`]; the
/// chainable `table(..).insert(..).execute()` surface comes from
/// [`DatabaseClientExt`].
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Run one table operation or RPC
    async fn execute(&self, request: QueryRequest) -> ClientResult<QueryResponse>;
}

/// Chainable query builders, available on every [`DatabaseClient`]
pub trait DatabaseClientExt: DatabaseClient {
    /// Start a query against `name`
    fn table(&self, name: &str) -> TableRef<'_, Self> {
        TableRef::new(self, name)
    }

    /// Call the stored procedure `function` with `params`
    fn rpc(&self, function: &str, params: Value) -> PendingQuery<'_, Self> {
        PendingQuery::rpc(self, function, params)
    }
}

impl<C: DatabaseClient + ?Sized> DatabaseClientExt for C {}
