//! Scoped connection checkout

use super::traits::Connection;
use std::ops::Deref;
use std::sync::Arc;

type ReleaseHook = Box<dyn FnOnce() + Send + Sync>;

/// Connection checked out of a [`ConnectionPool`](super::ConnectionPool)
///
/// Dereferences to the underlying [`Connection`]. Dropping the guard runs the
/// pool's release hook exactly once, whichever way the owning scope exits.
pub struct PooledConnection {
    connection: Arc<dyn Connection>,
    on_release: Option<ReleaseHook>,
}

impl PooledConnection {
    pub fn new<F>(connection: Arc<dyn Connection>, on_release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            connection,
            on_release: Some(Box::new(on_release)),
        }
    }

    /// Shared handle to the underlying connection
    pub const fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Whether this guard wraps the same allocation as `other`
    pub fn shares_connection_with<T: ?Sized>(&self, other: &Arc<T>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.connection), Arc::as_ptr(other))
    }
}

impl Deref for PooledConnection {
    type Target = dyn Connection;

    fn deref(&self) -> &Self::Target {
        self.connection.as_ref()
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for PooledConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConnection")
            .field("released", &self.on_release.is_none())
            .finish_non_exhaustive()
    }
}
