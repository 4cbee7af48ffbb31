//! Common utilities and patterns shared across crawlrag crates
//!
//! Holds the error-enum macros every crate builds its error type from and the
//! one-shot environment bootstrap used by binaries and test harnesses alike.

pub mod error;
pub mod init;

pub use error::CommonError;
pub use init::{initialize_environment, is_environment_initialized};
