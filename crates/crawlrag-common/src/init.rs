//! Global initialization utilities

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the process environment
///
/// Loads variables from a `.env` file in the current directory or any parent.
/// A missing file is not an error. Safe to call multiple times - only the
/// first call does any work.
pub fn initialize_environment() {
    INIT.call_once(|| match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => tracing::trace!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    });
}

/// Whether [`initialize_environment`] has already run in this process
pub fn is_environment_initialized() -> bool {
    INIT.is_completed()
}
