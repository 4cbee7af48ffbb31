//! Trait abstractions for direct `PostgreSQL` access

use super::guard::PooledConnection;
use crate::ClientResult;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One result row, keyed by column name
pub type Row = Map<String, Value>;

/// A single database connection
///
/// Parameters are positional (`$1`, `$2`, ...) and carried as JSON values so
/// the trait stays independent of any driver's type system.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Run a statement that returns no rows
    async fn execute(&self, sql: &str, params: &[Value]) -> ClientResult<()>;

    /// Run one statement once per parameter row
    async fn execute_many(&self, sql: &str, rows: &[Vec<Value>]) -> ClientResult<()>;

    /// Fetch at most one row
    async fn fetch_row(&self, sql: &str, params: &[Value]) -> ClientResult<Option<Row>>;

    /// Fetch every matching row
    async fn fetch(&self, sql: &str, params: &[Value]) -> ClientResult<Vec<Row>>;
}

/// Source of scoped connections
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    /// Check out a connection; it returns to the pool when the guard drops
    async fn acquire(&self) -> ClientResult<PooledConnection>;
}
