//! Shared fixtures for crawlrag tests
//!
//! Every fixture builds a fresh, fully owned value on each call: a settings
//! bundle filled with test credentials, mock collaborators with canned
//! replies, sample domain records, and an async stream over a fixed list.
//!
//! ## Usage
//!
//! In your test crate's `Cargo.toml`:
//! ```toml
//! [dev-dependencies]
//! crawlrag-test-utils = { path = "../crawlrag-test-utils" }
//! ```
//!
//! In your tests:
//! ```no_run
//! use crawlrag_clients::LlmClient;
//! use crawlrag_test_utils::{mock_llm_client, test_settings};
//!
//! #[tokio::test]
//! async fn embeds_with_configured_model() {
//!     let settings = test_settings();
//!     let llm = mock_llm_client();
//!     llm.embeddings.fails_next("rate limited");
//!     // ... exercise code under test with `settings` and `llm` ...
//! }
//! ```

pub mod fixtures;
pub mod samples;
pub mod stream;

pub use fixtures::{
    mock_crawler, mock_database_client, mock_llm_client, mock_postgres_pool, test_settings,
    test_settings_with,
};
pub use samples::{sample_code_example, sample_document};
pub use stream::async_iterator;

/// Install a test-friendly tracing subscriber
///
/// Output goes through the test harness writer so it is captured per test.
/// Control the level with `RUST_LOG` (defaults to `warn`). Safe to call from
/// every test; only the first call installs anything.
pub fn init_test_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_target(true)
                .compact(),
        )
        .with(filter)
        .try_init();
}
