pub mod mock;
pub mod query;
pub mod traits;

pub use mock::MockDatabaseClient;
pub use query::{Filter, PendingQuery, QueryOperation, QueryRequest, QueryResponse, TableRef};
pub use traits::{DatabaseClient, DatabaseClientExt};
