//! Mock `PostgreSQL` pool and connection for testing

use super::guard::PooledConnection;
use super::traits::{Connection, ConnectionPool, Row};
use crate::stub::Stub;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Statement plus its positional parameters, as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct SqlCall {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlCall {
    fn new(sql: &str, params: &[Value]) -> Self {
        Self {
            sql: sql.to_string(),
            params: params.to_vec(),
        }
    }
}

/// Batched statement with one parameter row per execution
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCall {
    pub sql: String,
    pub rows: Vec<Vec<Value>>,
}

/// Connection where every statement succeeds with no result
#[derive(Debug)]
pub struct MockConnection {
    pub execute: Stub<SqlCall, ()>,
    pub execute_many: Stub<BatchCall, ()>,
    pub fetch_row: Stub<SqlCall, Option<Row>>,
    pub fetch: Stub<SqlCall, Vec<Row>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// SQL text of every statement run through this connection
    pub fn statements(&self) -> Vec<String> {
        let mut statements: Vec<String> = self
            .execute
            .calls()
            .into_iter()
            .chain(self.fetch_row.calls())
            .chain(self.fetch.calls())
            .map(|call| call.sql)
            .collect();
        statements.extend(self.execute_many.calls().into_iter().map(|call| call.sql));
        statements
    }
}

impl Default for MockConnection {
    fn default() -> Self {
        Self {
            execute: Stub::new("postgres.execute", ()),
            execute_many: Stub::new("postgres.execute_many", ()),
            fetch_row: Stub::new("postgres.fetch_row", None),
            fetch: Stub::new("postgres.fetch", Vec::new()),
        }
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn execute(&self, sql: &str, params: &[Value]) -> ClientResult<()> {
        self.execute
            .invoke(SqlCall::new(sql, params), ClientError::Pool)
            .await
    }

    async fn execute_many(&self, sql: &str, rows: &[Vec<Value>]) -> ClientResult<()> {
        let call = BatchCall {
            sql: sql.to_string(),
            rows: rows.to_vec(),
        };
        self.execute_many.invoke(call, ClientError::Pool).await
    }

    async fn fetch_row(&self, sql: &str, params: &[Value]) -> ClientResult<Option<Row>> {
        self.fetch_row
            .invoke(SqlCall::new(sql, params), ClientError::Pool)
            .await
    }

    async fn fetch(&self, sql: &str, params: &[Value]) -> ClientResult<Vec<Row>> {
        self.fetch
            .invoke(SqlCall::new(sql, params), ClientError::Pool)
            .await
    }
}

/// Pool that owns a single [`MockConnection`] and hands it out on every
/// acquisition
#[derive(Debug)]
pub struct MockPostgresPool {
    connection: Arc<MockConnection>,
    pub acquire: Stub<(), ()>,
    released: Arc<AtomicUsize>,
}

impl MockPostgresPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The connection every acquisition yields
    pub const fn connection(&self) -> &Arc<MockConnection> {
        &self.connection
    }

    /// Number of guards dropped so far
    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Default for MockPostgresPool {
    fn default() -> Self {
        Self {
            connection: Arc::new(MockConnection::new()),
            acquire: Stub::new("postgres.acquire", ()),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ConnectionPool for MockPostgresPool {
    async fn acquire(&self) -> ClientResult<PooledConnection> {
        self.acquire.invoke((), ClientError::Pool).await?;

        let released = Arc::clone(&self.released);
        let connection = Arc::clone(&self.connection) as Arc<dyn Connection>;
        Ok(PooledConnection::new(connection, move || {
            released.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
