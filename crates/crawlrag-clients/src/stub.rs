//! Configurable canned replies for test doubles
//!
//! A [`Stub`] backs exactly one mocked operation. It remembers every request
//! it sees and answers with whatever the test configured last: a fixed value,
//! a standing failure, a one-shot failure, or a handler computed from the
//! request. Every invocation yields to the scheduler once before answering,
//! so callers observe a real suspension point without any blocking.

use crate::error::{ClientError, ClientResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Reply computed from the incoming request
pub type Handler<Req, T> = Arc<dyn Fn(&Req) -> ClientResult<T> + Send + Sync>;

enum Reply<Req, T> {
    Value(T),
    Error(String),
    Handler(Handler<Req, T>),
}

impl<Req, T: Clone> Clone for Reply<Req, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Error(message) => Self::Error(message.clone()),
            Self::Handler(handler) => Self::Handler(Arc::clone(handler)),
        }
    }
}

struct StubState<Req, T> {
    reply: Reply<Req, T>,
    next_failure: Option<String>,
    calls: Vec<Req>,
}

/// One mocked operation: its configured reply plus the requests it received
pub struct Stub<Req, T> {
    operation: &'static str,
    state: Mutex<StubState<Req, T>>,
}

impl<Req, T> std::fmt::Debug for Stub<Req, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stub")
            .field("operation", &self.operation)
            .field("calls", &self.lock().calls.len())
            .finish_non_exhaustive()
    }
}

impl<Req, T> Stub<Req, T> {
    /// Mutex poisoning only means another test thread panicked mid-update;
    /// the recorded state is still usable.
    fn lock(&self) -> MutexGuard<'_, StubState<Req, T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Req, T> Stub<Req, T>
where
    Req: Clone,
    T: Clone,
{
    /// Create a stub that answers every call with `value`
    pub fn new(operation: &'static str, value: T) -> Self {
        Self {
            operation,
            state: Mutex::new(StubState {
                reply: Reply::Value(value),
                next_failure: None,
                calls: Vec::new(),
            }),
        }
    }

    /// Name used in logs, e.g. `"llm.create_embeddings"`
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Answer every subsequent call with `value`
    pub fn returns(&self, value: T) {
        self.lock().reply = Reply::Value(value);
    }

    /// Fail every subsequent call with `message`
    pub fn fails_with(&self, message: impl Into<String>) {
        self.lock().reply = Reply::Error(message.into());
    }

    /// Fail only the next call, then fall back to the configured reply
    pub fn fails_next(&self, message: impl Into<String>) {
        self.lock().next_failure = Some(message.into());
    }

    /// Compute each reply from the request
    pub fn responds_with<F>(&self, handler: F)
    where
        F: Fn(&Req) -> ClientResult<T> + Send + Sync + 'static,
    {
        self.lock().reply = Reply::Handler(Arc::new(handler));
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Every request received, oldest first
    pub fn calls(&self) -> Vec<Req> {
        self.lock().calls.clone()
    }

    /// Most recent request, if any
    pub fn last_call(&self) -> Option<Req> {
        self.lock().calls.last().cloned()
    }

    /// Forget recorded requests without touching the configured reply
    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    /// Suspend once, record `request`, then produce the configured reply
    ///
    /// Configured failures are wrapped with `into_error` so each collaborator
    /// reports its own `ClientError` variant.
    ///
    /// # Errors
    /// Returns the configured failure, if any
    pub async fn invoke(
        &self,
        request: Req,
        into_error: fn(String) -> ClientError,
    ) -> ClientResult<T> {
        tokio::task::yield_now().await;
        self.resolve(request, into_error)
    }

    fn resolve(&self, request: Req, into_error: fn(String) -> ClientError) -> ClientResult<T> {
        let (reply, one_shot) = {
            let mut state = self.lock();
            state.calls.push(request.clone());
            tracing::debug!(
                operation = self.operation,
                call = state.calls.len(),
                "Mock operation invoked"
            );
            (state.reply.clone(), state.next_failure.take())
        };

        if let Some(message) = one_shot {
            return Err(into_error(message));
        }

        // Handlers run outside the lock so they may reconfigure this stub
        match reply {
            Reply::Value(value) => Ok(value),
            Reply::Error(message) => Err(into_error(message)),
            Reply::Handler(handler) => handler(&request),
        }
    }
}
