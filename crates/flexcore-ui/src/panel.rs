//! Rendering targets for the chat widget.
//!
//! The controller never touches a concrete UI.  It talks to a
//! [`MessagePanel`] (the scrolling message list plus the suggestion strip)
//! and an [`InputField`].  [`MemoryPanel`] and [`MemoryInput`] keep
//! everything in memory; the terminal host draws straight from them.

use crate::chat::Role;

/// Handle to one node appended to a [`MessagePanel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Something the panel can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelNode {
    /// A rendered message bubble.
    Message {
        role: Role,
        html: String,
        timestamp: String,
    },
    /// The "bot is typing" placeholder.
    TypingIndicator,
}

impl PanelNode {
    pub fn is_typing(&self) -> bool {
        matches!(self, PanelNode::TypingIndicator)
    }
}

/// Scrolling list of message nodes with a suggestion strip underneath.
pub trait MessagePanel {
    /// Append a node at the bottom and return its handle.
    fn append(&mut self, node: PanelNode) -> NodeId;

    /// Remove exactly the node `id`.  Returns `false` if it is not present.
    fn remove(&mut self, id: NodeId) -> bool;

    /// Bring the newest node into view.
    fn scroll_to_latest(&mut self);

    /// Replace the quick-reply suggestions.
    fn show_suggestions(&mut self, suggestions: &[String]);
}

/// Single-line text input.
pub trait InputField {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn focus(&mut self);
}

// ---------------------------------------------------------------------------
// In-memory implementations
// ---------------------------------------------------------------------------

/// [`MessagePanel`] that stores nodes in a vector.
#[derive(Debug, Default)]
pub struct MemoryPanel {
    nodes: Vec<(NodeId, PanelNode)>,
    suggestions: Vec<String>,
    next_id: u64,
    scrolls: usize,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in display order.
    pub fn nodes(&self) -> impl Iterator<Item = &PanelNode> {
        self.nodes.iter().map(|(_, node)| node)
    }

    pub fn get(&self, id: NodeId) -> Option<&PanelNode> {
        self.nodes.iter().find(|(n, _)| *n == id).map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a typing indicator is currently displayed.
    pub fn has_typing_indicator(&self) -> bool {
        self.nodes().any(PanelNode::is_typing)
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// How many times the panel was asked to scroll.
    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }
}

impl MessagePanel for MemoryPanel {
    fn append(&mut self, node: PanelNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    fn remove(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|(n, _)| *n != id);
        self.nodes.len() != before
    }

    fn scroll_to_latest(&mut self) {
        self.scrolls += 1;
    }

    fn show_suggestions(&mut self, suggestions: &[String]) {
        self.suggestions = suggestions.to_vec();
    }
}

/// [`InputField`] backed by a `String`.
#[derive(Debug, Default)]
pub struct MemoryInput {
    text: String,
    focused: bool,
}

impl MemoryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl InputField for MemoryInput {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble(text: &str) -> PanelNode {
        PanelNode::Message {
            role: Role::Bot,
            html: text.into(),
            timestamp: "12:00".into(),
        }
    }

    #[test]
    fn append_assigns_distinct_ids() {
        let mut panel = MemoryPanel::new();
        let a = panel.append(bubble("a"));
        let b = panel.append(bubble("b"));
        assert_ne!(a, b);
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn remove_targets_exactly_one_node() {
        let mut panel = MemoryPanel::new();
        let a = panel.append(PanelNode::TypingIndicator);
        let b = panel.append(PanelNode::TypingIndicator);
        assert!(panel.remove(a));
        assert!(!panel.remove(a));
        assert_eq!(panel.len(), 1);
        assert!(panel.get(b).is_some());
    }

    #[test]
    fn suggestions_are_replaced() {
        let mut panel = MemoryPanel::new();
        panel.show_suggestions(&["x".into(), "y".into()]);
        panel.show_suggestions(&["z".into()]);
        assert_eq!(panel.suggestions(), ["z".to_string()]);
    }

    #[test]
    fn memory_input_round_trip() {
        let mut input = MemoryInput::new();
        input.push_char('h');
        input.push_char('i');
        assert_eq!(input.text(), "hi");
        input.set_text("");
        assert!(input.as_str().is_empty());
        input.focus();
        assert!(input.is_focused());
    }
}
