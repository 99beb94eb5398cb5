//! Shared helpers for the CLI subcommands.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use flexcore_intent::Responder;
use flexcore_kernel::{AnalyticsSink, RandomSource, SeededRandom, ThreadRandom};
use flexcore_ui::{MarkupStripper, MemoryInput, MemoryPanel, WidgetConfig};
use flexcore_tui::TuiController;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env("FLEXCORE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the global tracing subscriber.
///
/// `FLEXCORE_LOG`, then `RUST_LOG`, override `default_level`.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .compact()
        .init();
}

/// Initialize tracing with output discarded, for the full-screen TUI.
pub fn init_tracing_silent() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::sink)
        .init();
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub fn build_responder() -> Result<Arc<Responder>> {
    Ok(Arc::new(
        Responder::flexbot().context("failed to build the FlexBot rule table")?,
    ))
}

pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

/// A controller with an in-memory panel and input, delaying replies as
/// `widget` says.
pub fn build_controller(
    widget: &WidgetConfig,
    analytics: Arc<dyn AnalyticsSink>,
) -> Result<TuiController> {
    let controller = TuiController::new(build_responder()?, analytics)
        .context("failed to build the conversation controller")?
        .with_delay(Box::new(widget.typing_delay()))
        .with_panel(MemoryPanel::new())
        .with_input(MemoryInput::new());
    Ok(controller)
}

/// Bot HTML as indented plain-text lines for the terminal.
pub fn render_plain(html: &str, stripper: &MarkupStripper) -> String {
    flexcore_tui::ui::plain_lines(html, stripper)
        .into_iter()
        .filter(|line| !line.is_empty())
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Product modal HTML as one plain-text line per element.
pub fn modal_text(html: &str, stripper: &MarkupStripper) -> String {
    html.replace("</", "\n</")
        .lines()
        .map(|line| stripper.strip(line))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
