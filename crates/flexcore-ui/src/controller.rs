//! Chat widget controller.
//!
//! [`ConversationController`] owns everything the widget knows: visibility,
//! the transcript, the pending turn and the suggestion strip.  It renders
//! through the injected [`MessagePanel`] / [`InputField`] and reports
//! through an [`AnalyticsSink`].  Either rendering target may be absent, in
//! which case rendering is skipped and the transcript logic still runs.
//!
//! A turn goes through two calls: [`submit`](ConversationController::submit)
//! records the user message, shows the typing indicator and hands back a
//! [`PendingReply`]; once its delay has elapsed the host passes it to
//! [`resolve`](ConversationController::resolve).  Each accepted submission
//! gets a fresh turn id so that [`clear`](ConversationController::clear)
//! can invalidate a reply that is still in flight.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, info};

use flexcore_intent::{Responder, contextual_suggestions};
use flexcore_kernel::{AnalyticsSink, DelaySource, RandomSource, ThreadRandom, UniformDelay};

use crate::chat::{Message, Role, Transcript};
use crate::error::Result;
use crate::export::{MarkupStripper, TranscriptExport};
use crate::panel::{InputField, MessagePanel, NodeId, PanelNode};

const CATEGORY: &str = "Chatbot";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether the widget window is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
}

/// Where the controller is in the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Ready for a new submission.
    Idle,
    /// A user message was accepted and its reply has not been resolved.
    AwaitingResponse { turn: u64 },
}

/// A reply the host must resolve after `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub turn: u64,
    /// The (trimmed) user text the reply answers.
    pub text: String,
    pub delay: Duration,
}

/// Snapshot of conversation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageStats {
    pub total: usize,
    pub user: usize,
    pub bot: usize,
    pub dark_mode: bool,
    pub open: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct ConversationController<P, I> {
    panel: Option<P>,
    input: Option<I>,

    responder: Arc<Responder>,
    analytics: Arc<dyn AnalyticsSink>,
    random: Box<dyn RandomSource>,
    delay: Box<dyn DelaySource>,
    stripper: MarkupStripper,

    transcript: Transcript,
    visibility: Visibility,
    turn: TurnState,
    last_turn: u64,

    /// Panel node of the greeting; survives `clear`.
    greeting_node: Option<NodeId>,
    /// Panel nodes of every message after the greeting.
    message_nodes: Vec<NodeId>,
    typing_node: Option<NodeId>,

    suggestions: Vec<String>,
    dark_mode: bool,
}

impl<P: MessagePanel, I: InputField> ConversationController<P, I> {
    /// Create a closed, headless controller with random fallback selection
    /// and a 1-2 s typing delay.
    pub fn new(responder: Arc<Responder>, analytics: Arc<dyn AnalyticsSink>) -> Result<Self> {
        Ok(Self {
            panel: None,
            input: None,
            responder,
            analytics,
            random: Box::new(ThreadRandom),
            delay: Box::new(UniformDelay::default()),
            stripper: MarkupStripper::new()?,
            transcript: Transcript::new(),
            visibility: Visibility::Closed,
            turn: TurnState::Idle,
            last_turn: 0,
            greeting_node: None,
            message_nodes: Vec::new(),
            typing_node: None,
            suggestions: starter_suggestions(""),
            dark_mode: false,
        })
    }

    /// Attach the message panel and render the current transcript into it.
    pub fn with_panel(mut self, mut panel: P) -> Self {
        self.message_nodes.clear();
        self.typing_node = None;
        self.greeting_node = None;
        for (i, message) in self.transcript.messages().iter().enumerate() {
            let id = panel.append(node_for(message));
            if i == 0 {
                self.greeting_node = Some(id);
            } else {
                self.message_nodes.push(id);
            }
        }
        if matches!(self.turn, TurnState::AwaitingResponse { .. }) {
            self.typing_node = Some(panel.append(PanelNode::TypingIndicator));
        }
        panel.show_suggestions(&self.suggestions);
        panel.scroll_to_latest();
        self.panel = Some(panel);
        self
    }

    pub fn with_input(mut self, input: I) -> Self {
        self.input = Some(input);
        self
    }

    /// Use `random` to pick fallback responses.
    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Use `delay` for the simulated typing time.
    pub fn with_delay(mut self, delay: Box<dyn DelaySource>) -> Self {
        self.delay = delay;
        self
    }

    // -- visibility ---------------------------------------------------------

    /// Show the widget.  Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.visibility == Visibility::Open {
            return false;
        }
        self.visibility = Visibility::Open;
        if let Some(input) = &mut self.input {
            input.focus();
        }
        info!("chat widget opened");
        self.analytics.track(CATEGORY, "open", "toggle_button");
        true
    }

    /// Hide the widget.  Returns `false` if it was already closed.
    ///
    /// A reply still pending is not cancelled; it is appended to the hidden
    /// transcript when resolved.
    pub fn close(&mut self) -> bool {
        if self.visibility == Visibility::Closed {
            return false;
        }
        self.visibility = Visibility::Closed;
        info!("chat widget closed");
        self.analytics.track(CATEGORY, "close", "toggle_button");
        true
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> Visibility {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.visibility
    }

    // -- turns ----------------------------------------------------------------

    /// Accept a user message.
    ///
    /// Returns `None` without touching any state when `text` is blank or a
    /// reply is still pending.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            debug!("submit ignored: empty message");
            return None;
        }
        if let TurnState::AwaitingResponse { turn } = self.turn {
            debug!(turn, "submit ignored: reply pending");
            return None;
        }

        let message = Message::user(text);
        self.render(&message);
        self.transcript.push(message);

        if let Some(panel) = &mut self.panel {
            self.typing_node = Some(panel.append(PanelNode::TypingIndicator));
            panel.scroll_to_latest();
        }

        self.last_turn += 1;
        let turn = self.last_turn;
        self.turn = TurnState::AwaitingResponse { turn };
        let delay = self.delay.next_delay();

        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        debug!(turn, delay_ms, "message accepted");
        self.analytics.track(CATEGORY, "message_sent", "user_input");

        Some(PendingReply {
            turn,
            text: text.to_owned(),
            delay,
        })
    }

    /// Produce and render the bot reply for `pending`.
    ///
    /// Replies for a turn other than the one awaited are dropped.
    pub fn resolve(&mut self, pending: PendingReply) -> Option<&Message> {
        match self.turn {
            TurnState::AwaitingResponse { turn } if turn == pending.turn => {}
            _ => {
                debug!(turn = pending.turn, "stale reply dropped");
                return None;
            }
        }

        let reply = self.responder.respond(&pending.text, self.random.as_mut());
        debug!(turn = pending.turn, intent = ?reply.intent, "reply resolved");

        if let Some(node) = self.typing_node.take()
            && let Some(panel) = &mut self.panel
        {
            panel.remove(node);
        }

        let message = Message::bot(reply.text);
        self.render(&message);

        self.suggestions = reply.suggestions;
        if let Some(panel) = &mut self.panel {
            panel.show_suggestions(&self.suggestions);
        }

        self.turn = TurnState::Idle;
        self.analytics.track(CATEGORY, "bot_response", "generated");
        Some(self.transcript.push(message))
    }

    /// Wait out the typing delay, then [`resolve`](Self::resolve).
    pub async fn respond_after_delay(&mut self, pending: PendingReply) -> Option<&Message> {
        tokio::time::sleep(pending.delay).await;
        self.resolve(pending)
    }

    /// Submit the contents of the input field, clearing it on success.
    pub fn submit_input(&mut self) -> Option<PendingReply> {
        let text = self.input.as_ref()?.text();
        let pending = self.submit(&text)?;
        if let Some(input) = &mut self.input {
            input.set_text("");
        }
        Some(pending)
    }

    /// Send a suggestion chip as if the user had typed it.
    pub fn quick_reply(&mut self, text: &str) -> Option<PendingReply> {
        self.analytics.track(CATEGORY, "quick_reply", text);
        if let Some(input) = &mut self.input {
            input.set_text(text);
            return self.submit_input();
        }
        self.submit(text)
    }

    /// Reset the conversation to the greeting.
    ///
    /// A reply still in flight is invalidated and will be dropped by
    /// `resolve`.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.turn = TurnState::Idle;
        self.suggestions = starter_suggestions("");

        if let Some(panel) = &mut self.panel {
            for id in self.message_nodes.drain(..) {
                panel.remove(id);
            }
            if let Some(id) = self.typing_node.take() {
                panel.remove(id);
            }
            panel.show_suggestions(&self.suggestions);
            panel.scroll_to_latest();
        } else {
            self.message_nodes.clear();
            self.typing_node = None;
        }

        info!("conversation cleared");
        self.analytics
            .track(CATEGORY, "conversation_cleared", "user_action");
    }

    /// Plain-text transcript named after today's date.
    pub fn export(&self) -> TranscriptExport {
        let export = TranscriptExport::build(
            self.transcript.messages(),
            Local::now().date_naive(),
            &self.stripper,
        );
        self.analytics
            .track(CATEGORY, "conversation_exported", "download");
        export
    }

    /// Replace the suggestion strip with starters for a page section.
    pub fn suggest_for_section(&mut self, section: &str) {
        self.suggestions = starter_suggestions(section);
        if let Some(panel) = &mut self.panel {
            panel.show_suggestions(&self.suggestions);
        }
    }

    /// Flip dark mode and return the new setting.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        let label = if self.dark_mode { "enabled" } else { "disabled" };
        self.analytics.track(CATEGORY, "dark_mode_toggle", label);
        self.dark_mode
    }

    pub fn usage(&self) -> UsageStats {
        UsageStats {
            total: self.transcript.len(),
            user: self.transcript.count(Role::User),
            bot: self.transcript.count(Role::Bot),
            dark_mode: self.dark_mode,
            open: self.is_open(),
        }
    }

    /// Whether the "need help?" preview bubble should be offered: the widget
    /// is closed and nothing has been said yet.
    pub fn preview_due(&self) -> bool {
        self.visibility == Visibility::Closed && self.transcript.is_pristine()
    }

    // -- accessors ------------------------------------------------------------

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.turn, TurnState::AwaitingResponse { .. })
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn panel(&self) -> Option<&P> {
        self.panel.as_ref()
    }

    pub fn input(&self) -> Option<&I> {
        self.input.as_ref()
    }

    pub fn input_mut(&mut self) -> Option<&mut I> {
        self.input.as_mut()
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    pub fn stripper(&self) -> &MarkupStripper {
        &self.stripper
    }

    fn render(&mut self, message: &Message) {
        if let Some(panel) = &mut self.panel {
            let id = panel.append(node_for(message));
            panel.scroll_to_latest();
            self.message_nodes.push(id);
        }
    }
}

fn node_for(message: &Message) -> PanelNode {
    PanelNode::Message {
        role: message.role,
        html: message.text.clone(),
        timestamp: message.timestamp.clone(),
    }
}

fn starter_suggestions(section: &str) -> Vec<String> {
    contextual_suggestions(section)
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use flexcore_intent::rules::GREETING;
    use flexcore_kernel::{FixedDelay, FixedRandom, RecordingAnalytics};

    use crate::panel::{MemoryInput, MemoryPanel};

    type Controller = ConversationController<MemoryPanel, MemoryInput>;

    fn controller() -> (Controller, Arc<RecordingAnalytics>) {
        let analytics = Arc::new(RecordingAnalytics::new());
        let c = Controller::new(Arc::new(Responder::flexbot().unwrap()), analytics.clone())
            .unwrap()
            .with_random(Box::new(FixedRandom::new(0)))
            .with_delay(Box::new(FixedDelay::zero()))
            .with_panel(MemoryPanel::new())
            .with_input(MemoryInput::new());
        (c, analytics)
    }

    #[test]
    fn starts_closed_with_greeting() {
        let (c, _) = controller();
        assert_eq!(c.visibility(), Visibility::Closed);
        assert_eq!(c.turn_state(), TurnState::Idle);
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.panel().unwrap().len(), 1);
        assert_eq!(c.suggestions().len(), 3);
    }

    #[test]
    fn open_close_are_idempotent() {
        let (mut c, analytics) = controller();
        assert!(c.open());
        assert!(!c.open());
        assert!(c.input().unwrap().is_focused());
        assert!(c.close());
        assert!(!c.close());
        assert_eq!(c.toggle(), Visibility::Open);
        assert_eq!(analytics.actions("Chatbot"), vec!["open", "close", "open"]);
    }

    #[test]
    fn blank_submissions_are_rejected() {
        let (mut c, analytics) = controller();
        assert!(c.submit("").is_none());
        assert!(c.submit("   ").is_none());
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.turn_state(), TurnState::Idle);
        assert!(analytics.events().is_empty());
    }

    #[test]
    fn submit_shows_typing_and_blocks_second_submit() {
        let (mut c, _) = controller();
        let pending = c.submit("  hello  ").unwrap();
        assert_eq!(pending.text, "hello");
        assert_eq!(pending.delay, Duration::ZERO);
        assert!(c.panel().unwrap().has_typing_indicator());
        assert!(c.is_awaiting());

        assert!(c.submit("again").is_none());
        assert_eq!(c.transcript().count(Role::User), 1);
    }

    #[test]
    fn huge_delay_is_carried_unchanged() {
        let (c, _) = controller();
        let mut c = c.with_delay(Box::new(FixedDelay(Duration::MAX)));
        let pending = c.submit("hello").unwrap();
        assert_eq!(pending.delay, Duration::MAX);
        assert!(c.is_awaiting());
    }

    #[test]
    fn resolve_replaces_typing_with_reply() {
        let (mut c, analytics) = controller();
        let pending = c.submit("How much does it cost?").unwrap();
        let reply = c.resolve(pending).unwrap().clone();

        assert_eq!(reply.role, Role::Bot);
        assert!(reply.text.contains("$19.99"));
        let panel = c.panel().unwrap();
        assert!(!panel.has_typing_indicator());
        assert_eq!(panel.len(), 3);
        assert_eq!(panel.suggestions().len(), 3);
        assert_eq!(c.turn_state(), TurnState::Idle);
        assert_eq!(
            analytics.actions("Chatbot"),
            vec!["message_sent", "bot_response"]
        );
    }

    #[test]
    fn clear_drops_in_flight_reply() {
        let (mut c, _) = controller();
        let first = c.submit("shipping").unwrap();
        c.resolve(first);
        let pending = c.submit("returns").unwrap();

        c.clear();
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript().messages()[0].text, GREETING);
        assert_eq!(c.panel().unwrap().len(), 1);
        assert!(!c.panel().unwrap().has_typing_indicator());

        assert!(c.resolve(pending).is_none());
        assert_eq!(c.transcript().len(), 1);
    }

    #[test]
    fn reply_after_close_is_still_appended() {
        let (mut c, _) = controller();
        c.open();
        let pending = c.submit("sizing").unwrap();
        c.close();
        assert!(c.resolve(pending).is_some());
        assert_eq!(c.transcript().len(), 3);
    }

    #[test]
    fn submit_input_reads_and_clears_field() {
        let (mut c, _) = controller();
        c.input_mut().unwrap().set_text("  kids sizes? ");
        let pending = c.submit_input().unwrap();
        assert_eq!(pending.text, "kids sizes?");
        assert!(c.input().unwrap().as_str().is_empty());
    }

    #[test]
    fn blank_input_is_left_alone() {
        let (mut c, _) = controller();
        c.input_mut().unwrap().set_text("   ");
        assert!(c.submit_input().is_none());
        assert_eq!(c.input().unwrap().as_str(), "   ");
    }

    #[test]
    fn quick_reply_tracks_label() {
        let (mut c, analytics) = controller();
        assert!(c.quick_reply("Pricing").is_some());
        assert_eq!(
            analytics.events()[0],
            (
                String::from("Chatbot"),
                String::from("quick_reply"),
                String::from("Pricing")
            )
        );
    }

    #[test]
    fn headless_controller_still_converses() {
        let analytics = Arc::new(RecordingAnalytics::new());
        let mut c = Controller::new(Arc::new(Responder::flexbot().unwrap()), analytics)
            .unwrap()
            .with_delay(Box::new(FixedDelay::zero()));
        assert!(c.open());
        assert!(c.submit_input().is_none());
        let pending = c.submit("thanks").unwrap();
        assert!(c.resolve(pending).is_some());
        assert_eq!(c.transcript().len(), 3);
        c.clear();
        assert!(c.transcript().is_pristine());
    }

    #[test]
    fn export_lists_every_message() {
        let (mut c, analytics) = controller();
        let pending = c.submit("hello").unwrap();
        c.resolve(pending);

        let export = c.export();
        assert_eq!(export.line_count(), 3);
        assert!(export.body.starts_with("FlexBot: Hi there!"));
        assert!(export.body.contains("\nYou: hello\n"));
        assert!(!export.body.contains('<'));
        assert!(export.file_name.starts_with("flexcore-chat-"));
        assert_eq!(
            analytics.actions("Chatbot").last().map(String::as_str),
            Some("conversation_exported")
        );
    }

    #[test]
    fn usage_and_preview() {
        let (mut c, _) = controller();
        assert!(c.preview_due());
        assert!(c.toggle_dark_mode());

        let pending = c.submit("eco").unwrap();
        c.resolve(pending);
        assert!(!c.preview_due());

        let usage = c.usage();
        assert_eq!(usage.total, 3);
        assert_eq!(usage.user, 1);
        assert_eq!(usage.bot, 2);
        assert!(usage.dark_mode);
        assert!(!usage.open);
    }

    #[test]
    fn section_suggestions() {
        let (mut c, _) = controller();
        c.suggest_for_section("support");
        assert_eq!(c.panel().unwrap().suggestions()[0], "Return policy");
    }

    #[tokio::test]
    async fn respond_after_delay_resolves() {
        let (mut c, _) = controller();
        let pending = c.submit("warranty").unwrap();
        let reply = c.respond_after_delay(pending).await;
        assert!(reply.is_some());
        assert!(!c.is_awaiting());
    }
}
