//! Keyboard shortcuts for the chat widget.
//!
//! Hosts translate their native key events into a [`KeyPress`] and ask
//! [`Shortcut::from_key`] what, if anything, it means.  Shortcuts only fire
//! while the widget is open.

/// The keys the widget cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
    Other,
}

/// A key with its modifier state.  `command` is Ctrl, or Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub command: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            command: false,
        }
    }

    pub fn command(c: char) -> Self {
        Self {
            key: Key::Char(c),
            shift: false,
            command: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Submit,
    Close,
    Clear,
    Export,
}

impl Shortcut {
    pub fn from_key(press: KeyPress, widget_open: bool) -> Option<Self> {
        if !widget_open {
            return None;
        }
        match press.key {
            Key::Enter if !press.shift => Some(Shortcut::Submit),
            Key::Escape => Some(Shortcut::Close),
            Key::Char(c) if press.command => match c.to_ascii_lowercase() {
                'k' => Some(Shortcut::Clear),
                's' => Some(Shortcut::Export),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_submits_unless_shifted() {
        assert_eq!(
            Shortcut::from_key(KeyPress::plain(Key::Enter), true),
            Some(Shortcut::Submit)
        );
        let shifted = KeyPress {
            shift: true,
            ..KeyPress::plain(Key::Enter)
        };
        assert_eq!(Shortcut::from_key(shifted, true), None);
    }

    #[test]
    fn command_shortcuts() {
        assert_eq!(Shortcut::from_key(KeyPress::command('k'), true), Some(Shortcut::Clear));
        assert_eq!(Shortcut::from_key(KeyPress::command('S'), true), Some(Shortcut::Export));
        assert_eq!(Shortcut::from_key(KeyPress::command('x'), true), None);
        assert_eq!(Shortcut::from_key(KeyPress::plain(Key::Char('k')), true), None);
        assert_eq!(
            Shortcut::from_key(KeyPress::plain(Key::Escape), true),
            Some(Shortcut::Close)
        );
    }

    #[test]
    fn nothing_fires_while_closed() {
        for press in [
            KeyPress::plain(Key::Enter),
            KeyPress::plain(Key::Escape),
            KeyPress::command('k'),
            KeyPress::command('s'),
        ] {
            assert_eq!(Shortcut::from_key(press, false), None);
        }
    }
}
