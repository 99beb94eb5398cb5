//! Kernel error types.
//!
//! All kernel subsystems surface errors through [`KernelError`], which is the
//! single error type returned by every fallible public API in this crate.

/// Unified error type for the FlexCore kernel.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    // -- Router errors ------------------------------------------------------
    /// A rule was registered without any keywords, so it could never match.
    #[error("rule {rule} has no keywords")]
    EmptyRule { rule: usize },

    /// A keyword is blank after trimming.
    #[error("invalid keyword `{keyword}` in rule {rule}")]
    InvalidKeyword { rule: usize, keyword: String },

    /// Building the internal automaton failed.
    #[error("router build error: {reason}")]
    RouterBuildError { reason: String },

    // -- Generic ------------------------------------------------------------
    /// Catch-all for unexpected internal errors that don't fit a specific
    /// variant.  Prefer a typed variant whenever possible.
    #[error("internal kernel error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the kernel crate.
pub type Result<T> = std::result::Result<T, KernelError>;
