//! Test helpers
//!
//! - [`key`]: build a `KeyEvent` from a string like `"ctrl+s"` or `"shift+tab"`
//! - [`click`]: left-button press at a cell
//! - [`RenderHarness`]: render into an in-memory buffer and read it back
//! - [`ActionAssertions`] and the `assert_emitted!` family for action lists

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::action::Action;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Parse a key description. Named keys and modifiers are case-insensitive;
/// single characters are taken as written, so `"J"` is a capital J.
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.eq_ignore_ascii_case("shift+tab") || s.eq_ignore_ascii_case("backtab") {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // A trailing '+' is the key itself, e.g. "+" or "ctrl++"
    let (prefix, key_part) = match s.strip_suffix('+') {
        Some(rest) if rest.is_empty() || rest.ends_with('+') => (rest, "+"),
        _ => match s.rsplit_once('+') {
            Some((prefix, key)) => (prefix, key),
            None => ("", s),
        },
    };

    let mut modifiers = KeyModifiers::empty();
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        _ => {
            let mut chars = key_part.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(press(code, modifiers))
}

/// Like [`parse_key`], panicking on a bad description.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {s:?}"))
}

pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::empty())
}

pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Left-button press at (`column`, `row`).
pub fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    }
}

/// Renders into a [`TestBackend`] of fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("test terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("draw failed: {e}"));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row, styles dropped.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string(self.render(draw))
    }
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                out.push_str(cell.symbol());
            }
        }
        out.push('\n');
    }
    out
}

/// Assertions on the actions a component returned.
pub trait ActionAssertions {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: Action);
    fn assert_contains(&self, expected: Action);
}

impl ActionAssertions for Vec<Action> {
    #[track_caller]
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got {self:?}");
    }

    #[track_caller]
    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "unexpected action count: {self:?}");
    }

    #[track_caller]
    fn assert_first(&self, expected: Action) {
        assert_eq!(self.first(), Some(&expected), "actions were {self:?}");
    }

    #[track_caller]
    fn assert_contains(&self, expected: Action) {
        assert!(
            self.contains(&expected),
            "expected {expected:?} in {self:?}"
        );
    }
}

/// Assert that an action matching the pattern is in the list.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
