//! Main TUI application state and input handling.
//!
//! [`TuiApp`] wraps the conversation controller together with the cursor,
//! scroll and status-line state of the terminal.  Every accepted message
//! spawns a sleep task that hands the [`PendingReply`] back through a
//! [`tokio::sync::mpsc`] channel once the typing delay has elapsed.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use flexcore_ui::{
    ConversationController, InputField, Key, KeyPress, MemoryInput, MemoryPanel, PendingReply,
    Shortcut, WidgetConfig,
};

use crate::error::Result;

/// The controller flavour the terminal drives.
pub type TuiController = ConversationController<MemoryPanel, MemoryInput>;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Actions the UI loop should take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Continue the main loop.
    Continue,
    /// Exit the application.
    Quit,
}

// ---------------------------------------------------------------------------
// TuiApp
// ---------------------------------------------------------------------------

/// The main TUI application state.
pub struct TuiApp {
    controller: TuiController,
    /// Cursor position within the input field, in characters.
    cursor_pos: usize,
    /// Vertical scroll offset for the messages area.
    scroll_offset: u16,
    /// One-line feedback shown under the header (export path, errors).
    status: Option<String>,
    /// Where exports are written.
    export_dir: PathBuf,
    /// Preview bubble timing.
    widget: WidgetConfig,
    started: Instant,
    reply_rx: mpsc::UnboundedReceiver<PendingReply>,
    reply_tx: mpsc::UnboundedSender<PendingReply>,
}

impl TuiApp {
    /// Wrap `controller`; the widget starts open.
    pub fn new(mut controller: TuiController, export_dir: impl Into<PathBuf>) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        controller.open();
        Self {
            controller,
            cursor_pos: 0,
            scroll_offset: 0,
            status: None,
            export_dir: export_dir.into(),
            widget: WidgetConfig::default(),
            started: Instant::now(),
            reply_rx,
            reply_tx,
        }
    }

    /// Use the preview timing of `widget` instead of the defaults.
    pub fn with_widget_config(mut self, widget: WidgetConfig) -> Self {
        self.widget = widget;
        self
    }

    // -- Accessors ----------------------------------------------------------

    pub fn controller(&self) -> &TuiController {
        &self.controller
    }

    /// Return the current input text.
    pub fn input(&self) -> &str {
        self.controller.input().map(MemoryInput::as_str).unwrap_or_default()
    }

    /// Return the cursor position within the input.
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Return the current scroll offset.
    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Whether a bot reply is pending.
    pub fn is_thinking(&self) -> bool {
        self.controller.is_awaiting()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether the closed widget should show its preview bubble now.
    pub fn show_preview(&self) -> bool {
        self.show_preview_at(self.started.elapsed())
    }

    /// Whether the preview bubble is shown `elapsed` after startup.
    pub fn show_preview_at(&self, elapsed: Duration) -> bool {
        self.controller.preview_due() && self.widget.preview_visible_at(elapsed)
    }

    // -- Key handling -------------------------------------------------------

    /// Handle a key event and return the action the UI should take.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        if !self.controller.is_open() {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') => AppAction::Quit,
                KeyCode::Enter => {
                    self.controller.open();
                    AppAction::Continue
                }
                _ => AppAction::Continue,
            };
        }

        if let Some(shortcut) = Shortcut::from_key(key_press(&key), true) {
            match shortcut {
                Shortcut::Submit => self.submit_input(),
                Shortcut::Close => {
                    self.controller.close();
                }
                Shortcut::Clear => {
                    self.controller.clear();
                    self.reset_cursor();
                    self.status = Some("Conversation cleared".to_owned());
                }
                Shortcut::Export => {
                    self.status = Some(match self.export() {
                        Ok(path) => format!("Saved {}", path.display()),
                        Err(e) => format!("Export failed: {e}"),
                    });
                }
            }
            return AppAction::Continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
            self.controller.toggle_dark_mode();
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::F(n) => self.quick_reply(usize::from(n)),
            KeyCode::Char(c) => {
                self.edit_input(|text, cursor| {
                    text.insert(byte_index(text, *cursor), c);
                    *cursor += 1;
                });
            }
            KeyCode::Backspace => {
                self.edit_input(|text, cursor| {
                    if *cursor > 0 {
                        *cursor -= 1;
                        text.remove(byte_index(text, *cursor));
                    }
                });
            }
            KeyCode::Delete => {
                self.edit_input(|text, cursor| {
                    if *cursor < text.chars().count() {
                        text.remove(byte_index(text, *cursor));
                    }
                });
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor_pos < self.input().chars().count() {
                    self.cursor_pos += 1;
                }
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
            }
            KeyCode::End => {
                self.cursor_pos = self.input().chars().count();
            }
            KeyCode::Up => {
                self.scroll_up(1);
            }
            KeyCode::Down => {
                self.scroll_down(1);
            }
            KeyCode::PageUp => {
                self.scroll_up(10);
            }
            KeyCode::PageDown => {
                self.scroll_down(10);
            }
            _ => {}
        }

        AppAction::Continue
    }

    // -- Scrolling ----------------------------------------------------------

    fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    // -- Input ----------------------------------------------------------------

    fn edit_input(&mut self, edit: impl FnOnce(&mut String, &mut usize)) {
        let Some(input) = self.controller.input_mut() else {
            return;
        };
        let mut text = input.text();
        self.cursor_pos = self.cursor_pos.min(text.chars().count());
        edit(&mut text, &mut self.cursor_pos);
        input.set_text(&text);
    }

    fn reset_cursor(&mut self) {
        self.cursor_pos = 0;
        self.scroll_offset = 0;
    }

    /// Submit the input field and schedule the reply.
    fn submit_input(&mut self) {
        if let Some(pending) = self.controller.submit_input() {
            self.reset_cursor();
            self.status = None;
            self.schedule(pending);
        }
    }

    /// Send the `n`th (1-based) suggestion.
    fn quick_reply(&mut self, n: usize) {
        let Some(text) = n
            .checked_sub(1)
            .and_then(|i| self.controller.suggestions().get(i))
            .cloned()
        else {
            return;
        };
        match self.controller.quick_reply(&text) {
            Some(pending) => {
                self.reset_cursor();
                self.schedule(pending);
            }
            // Rejected replies leave the suggestion in the field.
            None => self.cursor_pos = self.input().chars().count(),
        }
    }

    fn schedule(&self, pending: PendingReply) {
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(pending.delay).await;
            let _ = tx.send(pending);
        });
    }

    /// Write the transcript into the export directory.
    pub fn export(&self) -> Result<PathBuf> {
        let export = self.controller.export();
        Ok(export.write_to(Path::new(&self.export_dir))?)
    }

    // -- Reply polling --------------------------------------------------------

    /// Resolve every reply whose delay has elapsed.
    ///
    /// Should be called on every iteration of the main UI loop.
    pub fn check_pending_replies(&mut self) {
        while let Ok(pending) = self.reply_rx.try_recv() {
            if self.controller.resolve(pending).is_some() {
                tracing::debug!("bot reply rendered");
                self.scroll_offset = 0;
            }
        }
    }
}

fn key_press(key: &KeyEvent) -> KeyPress {
    KeyPress {
        key: match key.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        },
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        command: key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER),
    }
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| i)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::{KeyEventKind, KeyEventState};
    use flexcore_intent::Responder;
    use flexcore_kernel::{FixedDelay, FixedRandom, NoopAnalytics};

    fn make_key(code: KeyCode) -> KeyEvent {
        make_key_with_mods(code, KeyModifiers::empty())
    }

    fn make_key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn make_app(export_dir: &Path) -> TuiApp {
        let controller = TuiController::new(
            Arc::new(Responder::flexbot().unwrap()),
            Arc::new(NoopAnalytics),
        )
        .unwrap()
        .with_random(Box::new(FixedRandom::new(0)))
        .with_delay(Box::new(FixedDelay::zero()))
        .with_panel(MemoryPanel::new())
        .with_input(MemoryInput::new());
        TuiApp::new(controller, export_dir)
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.handle_key(make_key(KeyCode::Char(c)));
        }
    }

    async fn settle(app: &mut TuiApp) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.check_pending_replies();
    }

    #[test]
    fn typing_characters_appends_to_input() {
        let mut app = make_app(Path::new("."));
        type_text(&mut app, "hé");
        assert_eq!(app.input(), "hé");
        assert_eq!(app.cursor_pos(), 2);
    }

    #[test]
    fn backspace_and_delete() {
        let mut app = make_app(Path::new("."));
        type_text(&mut app, "abc");
        app.handle_key(make_key(KeyCode::Backspace));
        assert_eq!(app.input(), "ab");
        app.handle_key(make_key(KeyCode::Home));
        app.handle_key(make_key(KeyCode::Delete));
        assert_eq!(app.input(), "b");
        assert_eq!(app.cursor_pos(), 0);
    }

    #[test]
    fn cursor_movement() {
        let mut app = make_app(Path::new("."));
        type_text(&mut app, "xy");
        app.handle_key(make_key(KeyCode::Left));
        assert_eq!(app.cursor_pos(), 1);
        app.handle_key(make_key(KeyCode::Char('z')));
        assert_eq!(app.input(), "xzy");
        app.handle_key(make_key(KeyCode::End));
        assert_eq!(app.cursor_pos(), 3);
        app.handle_key(make_key(KeyCode::Right));
        assert_eq!(app.cursor_pos(), 3);
    }

    #[test]
    fn escape_closes_then_quits() {
        let mut app = make_app(Path::new("."));
        assert_eq!(app.handle_key(make_key(KeyCode::Esc)), AppAction::Continue);
        assert!(!app.controller().is_open());
        assert_eq!(app.handle_key(make_key(KeyCode::Enter)), AppAction::Continue);
        assert!(app.controller().is_open());
        app.handle_key(make_key(KeyCode::Esc));
        assert_eq!(app.handle_key(make_key(KeyCode::Esc)), AppAction::Quit);
    }

    #[test]
    fn ctrl_c_returns_quit() {
        let mut app = make_app(Path::new("."));
        let action = app.handle_key(make_key_with_mods(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(action, AppAction::Quit);
    }

    #[test]
    fn page_up_down_scroll() {
        let mut app = make_app(Path::new("."));
        app.handle_key(make_key(KeyCode::PageUp));
        assert_eq!(app.scroll_offset(), 10);
        app.handle_key(make_key(KeyCode::Down));
        assert_eq!(app.scroll_offset(), 9);
        app.handle_key(make_key(KeyCode::PageDown));
        assert_eq!(app.scroll_offset(), 0);
    }

    #[test]
    fn ctrl_d_toggles_dark_mode() {
        let mut app = make_app(Path::new("."));
        app.handle_key(make_key_with_mods(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(app.controller().dark_mode());
        assert_eq!(app.input(), "");
    }

    #[test]
    fn empty_enter_does_nothing() {
        let mut app = make_app(Path::new("."));
        app.handle_key(make_key(KeyCode::Enter));
        assert_eq!(app.controller().transcript().len(), 1);
        assert!(!app.is_thinking());
    }

    #[tokio::test]
    async fn enter_submits_and_reply_arrives() {
        let mut app = make_app(Path::new("."));
        type_text(&mut app, "How much does it cost?");
        app.handle_key(make_key(KeyCode::Enter));

        assert!(app.is_thinking());
        assert_eq!(app.input(), "");
        assert_eq!(app.cursor_pos(), 0);

        settle(&mut app).await;
        assert!(!app.is_thinking());
        let last = app.controller().transcript().last().unwrap();
        assert!(last.text.contains("$19.99"));
    }

    #[tokio::test]
    async fn function_keys_send_suggestions() {
        let mut app = make_app(Path::new("."));
        let first = app.controller().suggestions()[0].clone();
        app.handle_key(make_key(KeyCode::F(1)));
        settle(&mut app).await;

        let messages = app.controller().transcript().messages();
        assert_eq!(messages[1].text, first);
        assert_eq!(messages.len(), 3);

        app.handle_key(make_key(KeyCode::F(9)));
        assert!(!app.is_thinking());
    }

    #[tokio::test]
    async fn ctrl_k_clears_and_drops_pending() {
        let mut app = make_app(Path::new("."));
        type_text(&mut app, "shipping");
        app.handle_key(make_key(KeyCode::Enter));
        app.handle_key(make_key_with_mods(KeyCode::Char('k'), KeyModifiers::CONTROL));
        settle(&mut app).await;

        assert!(app.controller().transcript().is_pristine());
        assert_eq!(app.status(), Some("Conversation cleared"));
    }

    #[tokio::test]
    async fn quick_reply_while_thinking_keeps_cursor_in_bounds() {
        let controller = TuiController::new(
            Arc::new(Responder::flexbot().unwrap()),
            Arc::new(NoopAnalytics),
        )
        .unwrap()
        .with_random(Box::new(FixedRandom::new(0)))
        .with_delay(Box::new(FixedDelay(Duration::from_secs(60))))
        .with_panel(MemoryPanel::new())
        .with_input(MemoryInput::new());
        let mut app = TuiApp::new(controller, Path::new("."));

        type_text(&mut app, "hello");
        app.handle_key(make_key(KeyCode::Enter));
        assert!(app.is_thinking());

        type_text(&mut app, "a long draft typed while the bot is replying");
        app.handle_key(make_key(KeyCode::F(3)));
        assert!(app.cursor_pos() <= app.input().chars().count());

        let before = app.input().chars().count();
        app.handle_key(make_key(KeyCode::Backspace));
        assert_eq!(app.input().chars().count(), before - 1);
        app.handle_key(make_key(KeyCode::Delete));
        assert_eq!(app.input().chars().count(), before - 1);
    }

    #[test]
    fn preview_follows_configured_window() {
        let mut app = make_app(Path::new("."))
            .with_widget_config(WidgetConfig::new().with_preview(10, 5));
        // Open widgets never show the bubble.
        assert!(!app.show_preview_at(Duration::from_secs(12)));

        app.handle_key(make_key(KeyCode::Esc));
        assert!(!app.show_preview_at(Duration::from_secs(3)));
        assert!(app.show_preview_at(Duration::from_secs(12)));
        assert!(!app.show_preview_at(Duration::from_secs(15)));
    }

    #[tokio::test]
    async fn no_preview_once_conversation_started() {
        let mut app = make_app(Path::new("."))
            .with_widget_config(WidgetConfig::new().with_preview(0, 60));
        type_text(&mut app, "hi");
        app.handle_key(make_key(KeyCode::Enter));
        settle(&mut app).await;
        app.handle_key(make_key(KeyCode::Esc));
        assert!(!app.show_preview_at(Duration::from_secs(1)));
    }

    #[test]
    fn ctrl_s_exports_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = make_app(dir.path());
        app.handle_key(make_key_with_mods(KeyCode::Char('s'), KeyModifiers::CONTROL));

        let status = app.status().unwrap();
        assert!(status.starts_with("Saved "));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
