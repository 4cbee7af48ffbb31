//! Query requests and the chainable builders that produce them

use super::traits::DatabaseClient;
use crate::ClientResult;
use serde_json::Value;

/// Kind of database call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperation {
    Insert,
    Select,
    Update,
    Delete,
    /// Stored procedure call, e.g. `match_crawled_pages`
    Rpc,
}

/// Equality filter applied to a table query
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// Fully built database call, handed to [`DatabaseClient::execute`]
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub operation: QueryOperation,
    /// Table name, or function name for [`QueryOperation::Rpc`]
    pub target: String,
    /// Rows for insert, values for update, parameters for RPC
    pub payload: Option<Value>,
    /// Column list for select
    pub columns: Option<String>,
    pub filters: Vec<Filter>,
    pub limit: Option<usize>,
}

impl QueryRequest {
    fn new(operation: QueryOperation, target: impl Into<String>) -> Self {
        Self {
            operation,
            target: target.into(),
            payload: None,
            columns: None,
            filters: Vec::new(),
            limit: None,
        }
    }
}

/// Rows returned by a database call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub data: Vec<Value>,
    pub count: Option<usize>,
}

impl QueryResponse {
    /// Response carrying no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Response carrying `rows`
    pub fn with_rows(rows: Vec<Value>) -> Self {
        let count = Some(rows.len());
        Self { data: rows, count }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Handle to one table, obtained from `DatabaseClientExt::table`
pub struct TableRef<'a, C: ?Sized> {
    client: &'a C,
    table: String,
}

impl<'a, C: DatabaseClient + ?Sized> TableRef<'a, C> {
    pub(crate) fn new(client: &'a C, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    fn pending(self, operation: QueryOperation) -> PendingQuery<'a, C> {
        PendingQuery {
            client: self.client,
            request: QueryRequest::new(operation, self.table),
        }
    }

    /// Insert one row (object) or many rows (array)
    #[must_use]
    pub fn insert(self, rows: Value) -> PendingQuery<'a, C> {
        let mut query = self.pending(QueryOperation::Insert);
        query.request.payload = Some(rows);
        query
    }

    /// Select `columns` (comma separated, `*` for all)
    #[must_use]
    pub fn select(self, columns: &str) -> PendingQuery<'a, C> {
        let mut query = self.pending(QueryOperation::Select);
        query.request.columns = Some(columns.to_string());
        query
    }

    /// Update matching rows with `values`
    #[must_use]
    pub fn update(self, values: Value) -> PendingQuery<'a, C> {
        let mut query = self.pending(QueryOperation::Update);
        query.request.payload = Some(values);
        query
    }

    /// Delete matching rows
    #[must_use]
    pub fn delete(self) -> PendingQuery<'a, C> {
        self.pending(QueryOperation::Delete)
    }
}

/// A database call that has been built but not yet executed
pub struct PendingQuery<'a, C: ?Sized> {
    client: &'a C,
    request: QueryRequest,
}

impl<'a, C: DatabaseClient + ?Sized> PendingQuery<'a, C> {
    pub(crate) fn rpc(client: &'a C, function: &str, params: Value) -> Self {
        let mut request = QueryRequest::new(QueryOperation::Rpc, function);
        request.payload = Some(params);
        Self { client, request }
    }

    /// Keep only rows where `column` equals `value`
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.request.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Cap the number of returned rows
    #[must_use]
    pub fn limit(mut self, count: usize) -> Self {
        self.request.limit = Some(count);
        self
    }

    /// The request that `execute` will send
    pub const fn request(&self) -> &QueryRequest {
        &self.request
    }

    /// Send the request
    ///
    /// # Errors
    /// Returns whatever the underlying client reports
    pub async fn execute(self) -> ClientResult<QueryResponse> {
        self.client.execute(self.request).await
    }
}
