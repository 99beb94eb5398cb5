//! Terminal host for the FlexCore chat widget.
//!
//! Renders a [`ConversationController`](flexcore_ui::ConversationController)
//! with `ratatui`, maps `crossterm` keys onto widget shortcuts, and resolves
//! bot replies from background sleep tasks through an mpsc channel polled by
//! the draw loop.

pub mod app;
pub mod error;
pub mod run;
pub mod ui;

pub use app::{AppAction, TuiApp, TuiController};
pub use error::{Result, TuiError};
pub use run::run_tui;
