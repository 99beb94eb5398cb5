//! Main event loop for the terminal UI.
//!
//! Sets up the terminal in raw mode with an alternate screen, runs the
//! draw-and-poll loop, and restores the terminal on exit.

use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use flexcore_ui::WidgetConfig;

use crate::app::{AppAction, TuiApp, TuiController};
use crate::error::Result;
use crate::ui;

/// Run the terminal chat widget until the user quits.
///
/// Exports triggered with Ctrl+S are written into `export_dir`; `widget`
/// supplies the preview bubble timing.
///
/// # Errors
///
/// Returns a [`TuiError`](crate::error::TuiError) if terminal setup, drawing,
/// or event handling fails.
pub async fn run_tui(
    controller: TuiController,
    widget: WidgetConfig,
    export_dir: PathBuf,
) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(controller, export_dir).with_widget_config(widget);

    tracing::info!("TUI event loop started");

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore the terminal regardless of whether the loop succeeded.
    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        messages = app.controller().usage().total,
        "TUI event loop ended"
    );

    result
}

/// The inner event loop, separated so terminal cleanup always runs.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Short poll so pending replies are picked up promptly.
        if event::poll(std::time::Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == crossterm::event::KeyEventKind::Press
            && app.handle_key(key) == AppAction::Quit
        {
            break;
        }

        app.check_pending_replies();
        tokio::task::yield_now().await;
    }

    Ok(())
}
