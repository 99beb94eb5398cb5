//! Rendering functions for the TUI layout.
//!
//! The layout consists of four vertically stacked areas:
//!
//! 1. **Header** (1 line): widget name, status, and key hints.
//! 2. **Messages** (fills remaining space): the scrollable transcript.
//! 3. **Suggestions** (1 line): quick replies bound to F1..F3.
//! 4. **Input** (3 lines): bordered text input field.
//!
//! While the widget is closed only the header and a preview line are drawn.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use flexcore_ui::{MarkupStripper, PanelNode, Role};

use crate::app::TuiApp;

const PREVIEW_TEXT: &str = "Need help? I'm here! 👋  (Enter to open, Esc to quit)";

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    if !app.controller().is_open() {
        draw_closed(frame, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // messages
            Constraint::Length(1), // suggestions
            Constraint::Length(3), // input
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_messages(frame, app, chunks[1]);
    draw_suggestions(frame, app, chunks[2]);
    draw_input(frame, app, chunks[3]);
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn draw_header(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.is_thinking() {
        Span::styled(" Typing... ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" Ready ", Style::default().fg(Color::Green))
    };

    let mut spans = vec![
        Span::styled(
            " FlexBot ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        status,
        Span::raw("| Esc close  ^K clear  ^S export  ^D theme "),
    ];
    if let Some(status) = app.status() {
        spans.push(Span::styled(
            format!("| {status} "),
            Style::default().fg(Color::White),
        ));
    }

    let bg = if app.controller().dark_mode() {
        Color::Black
    } else {
        Color::DarkGray
    };
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)), area);
}

fn draw_closed(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    let text = if app.show_preview() {
        PREVIEW_TEXT
    } else {
        "FlexBot is minimized.  (Enter to open, Esc to quit)"
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Cyan)),
        chunks[1],
    );
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Split bot HTML on `<br>` and strip the remaining markup from each line.
pub fn plain_lines(html: &str, stripper: &MarkupStripper) -> Vec<String> {
    html.split("<br>").map(|part| stripper.strip(part)).collect()
}

fn draw_messages(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let mut lines: Vec<Line<'_>> = Vec::new();
    let controller = app.controller();
    let stripper = controller.stripper();

    for node in controller.panel().into_iter().flat_map(|p| p.nodes()) {
        match node {
            PanelNode::Message {
                role,
                html,
                timestamp,
            } => {
                let (prefix, style) = match role {
                    Role::User => ("[You] ", Style::default().fg(Color::Cyan)),
                    Role::Bot => ("[FlexBot] ", Style::default().fg(Color::Green)),
                };
                for (i, text) in plain_lines(html, stripper).into_iter().enumerate() {
                    let lead = if i == 0 {
                        Span::styled(prefix, style.add_modifier(Modifier::BOLD))
                    } else {
                        Span::raw(" ".repeat(prefix.len()))
                    };
                    lines.push(Line::from(vec![lead, Span::styled(text, style)]));
                }
                lines.push(Line::from(Span::styled(
                    format!("{}{timestamp}", " ".repeat(prefix.len())),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                )));
            }
            PanelNode::TypingIndicator => {
                lines.push(Line::from(Span::styled(
                    "  FlexBot is typing...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
        }
    }

    // Show the bottom of the conversation by default, with the ability to
    // scroll up.
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let visible_height = area.height.saturating_sub(2);
    let max_scroll = total_lines.saturating_sub(visible_height);
    let effective_scroll = max_scroll.saturating_sub(app.scroll_offset());

    let messages_block = Block::default()
        .borders(Borders::ALL)
        .title(" FlexCore Support ")
        .border_style(Style::default().fg(Color::DarkGray));

    let messages_widget = Paragraph::new(lines)
        .block(messages_block)
        .wrap(Wrap { trim: false })
        .scroll((effective_scroll, 0));

    frame.render_widget(messages_widget, area);
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

fn draw_suggestions(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let mut spans = Vec::new();
    for (i, suggestion) in app.controller().suggestions().iter().enumerate() {
        spans.push(Span::styled(
            format!(" F{} ", i + 1),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::raw(format!(" {suggestion}  ")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

fn draw_input(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(if app.is_thinking() {
            " Message (waiting...) "
        } else {
            " Message "
        })
        .border_style(if app.is_thinking() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        });

    let input_widget = Paragraph::new(app.input())
        .block(input_block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(input_widget, area);

    if !app.is_thinking() {
        // +1 for the border offset on each axis.
        let cursor = u16::try_from(app.cursor_pos()).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(1).saturating_add(cursor);
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
