//! TUI error types.
//!
//! All TUI subsystems surface errors through [`TuiError`].

use thiserror::Error;

/// Unified error type for the terminal UI.
#[derive(Error, Debug)]
pub enum TuiError {
    /// An I/O operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The widget layer failed (e.g. writing an export).
    #[error("ui error: {0}")]
    Ui(#[from] flexcore_ui::UiError),
}

/// Convenience alias used throughout the TUI crate.
pub type Result<T> = std::result::Result<T, TuiError>;
