pub mod guard;
pub mod mock;
pub mod traits;

pub use guard::PooledConnection;
pub use mock::{BatchCall, MockConnection, MockPostgresPool, SqlCall};
pub use traits::{Connection, ConnectionPool, Row};
