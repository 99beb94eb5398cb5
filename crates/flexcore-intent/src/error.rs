//! Intent engine error types.
//!
//! All intent subsystems surface errors through [`IntentError`].  Errors only
//! arise while building a [`Responder`](crate::Responder); responding itself
//! is infallible.

/// Unified error type for the intent engine.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// A rule in the table is malformed.
    #[error("invalid rule `{name}`: {reason}")]
    InvalidRule { name: String, reason: String },

    /// The fallback set has no responses to choose from.
    #[error("fallback set is empty")]
    EmptyFallback,

    /// An error propagated from the kernel crate.
    #[error("kernel error: {0}")]
    Kernel(#[from] flexcore_kernel::KernelError),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
