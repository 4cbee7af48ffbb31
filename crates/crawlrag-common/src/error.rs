//! Common error handling utilities and patterns
//!
//! Every crawlrag crate defines its own error enum, but they all share the
//! same baseline variants. The macros here generate those variants and the
//! usual `From` conversions so crates only spell out what is specific to them.

/// Common error variants that appear across multiple crates
pub trait CommonError: std::error::Error + Send + Sync + 'static {
    /// Create an I/O error variant
    fn io_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Create a configuration error variant
    fn config_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Create a parsing error variant
    fn parse_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;

    /// Create a generic "other" error variant
    fn other_error(msg: impl Into<String>) -> Self
    where
        Self: Sized;
}

/// Macro to implement common error conversions
///
/// Generates:
/// - `From<std::io::Error>` routed to [`CommonError::io_error`]
/// - `From<anyhow::Error>` routed to [`CommonError::other_error`]
/// - `From<serde_json::Error>` routed to [`CommonError::parse_error`] (with `with_serde`)
///
/// The calling crate must depend on `anyhow` (and `serde_json` for `with_serde`).
#[macro_export]
macro_rules! impl_common_conversions {
    ($error_type:ident) => {
        impl From<std::io::Error> for $error_type {
            fn from(e: std::io::Error) -> Self {
                <$error_type as $crate::CommonError>::io_error(e.to_string())
            }
        }

        impl From<anyhow::Error> for $error_type {
            fn from(e: anyhow::Error) -> Self {
                <$error_type as $crate::CommonError>::other_error(e.to_string())
            }
        }
    };

    ($error_type:ident, with_serde) => {
        $crate::impl_common_conversions!($error_type);

        impl From<serde_json::Error> for $error_type {
            fn from(e: serde_json::Error) -> Self {
                <$error_type as $crate::CommonError>::parse_error(format!("JSON: {e}"))
            }
        }
    };
}

/// Macro to define a standard error enum with common variants
///
/// # Example
/// ```
/// # use crawlrag_common::define_error_enum;
/// define_error_enum! {
///     /// Errors raised by the widget service
///     pub enum WidgetError {
///         #[error("Widget not found: {0}")]
///         NotFound(String),
///     }
/// }
///
/// let err = WidgetError::NotFound("w-1".to_string());
/// assert_eq!(err.to_string(), "Widget not found: w-1");
/// ```
///
/// Expands to the enum (with `Io`, `Configuration`, `Parse` and `Other` added),
/// a [`CommonError`] implementation and a `Result<T>` alias. The calling crate
/// must depend on `thiserror`.
#[macro_export]
macro_rules! define_error_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($variant_type:ty),
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, thiserror::Error)]
        pub enum $name {
            #[error("IO error: {0}")]
            Io(String),

            #[error("Configuration error: {0}")]
            Configuration(String),

            #[error("Parse error: {0}")]
            Parse(String),

            #[error("Other error: {0}")]
            Other(String),

            $(
                $(#[$variant_meta])*
                $variant($variant_type),
            )*
        }

        impl $crate::CommonError for $name {
            fn io_error(msg: impl Into<String>) -> Self {
                Self::Io(msg.into())
            }

            fn config_error(msg: impl Into<String>) -> Self {
                Self::Configuration(msg.into())
            }

            fn parse_error(msg: impl Into<String>) -> Self {
                Self::Parse(msg.into())
            }

            fn other_error(msg: impl Into<String>) -> Self {
                Self::Other(msg.into())
            }
        }

        /// Specialized Result type
        pub type Result<T> = std::result::Result<T, $name>;
    };
}
