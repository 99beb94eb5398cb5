//! Error types for the UI crate.

use thiserror::Error;

/// Top-level error type for the FlexCore UI layer.
#[derive(Debug, Error)]
pub enum UiError {
    /// Writing an export or reading a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The widget configuration is inconsistent.
    #[error("invalid widget config: {0}")]
    InvalidConfig(String),

    /// A built-in pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Convenience alias for results within this crate.
pub type Result<T> = std::result::Result<T, UiError>;
