//! Single-line input for one credential

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::event::EventKind;
use crate::state::SetupField;

const MASK: char = '•';

pub struct CredentialInputProps<'a> {
    pub field: SetupField,
    pub value: &'a str,
    pub is_focused: bool,
}

/// Text input with a cursor. Edits emit `SetupFieldChange`, Enter submits
/// the form.
#[derive(Default)]
pub struct CredentialInput {
    /// Byte index into the value
    cursor: usize,
}

impl CredentialInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn prev_boundary(&self, value: &str) -> usize {
        value[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self, value: &str) -> usize {
        value[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let start = self.prev_boundary(value);
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }
        let end = self.next_boundary(value);
        Some(format!("{}{}", &value[..self.cursor], &value[end..]))
    }

    /// Text as shown: secret fields are masked.
    fn display(field: SetupField, value: &str) -> String {
        if field.is_secret() {
            MASK.to_string().repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }
}

impl Component for CredentialInput {
    type Props<'a> = CredentialInputProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if !props.is_focused {
            return vec![];
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return vec![];
        };
        let change = |value: String| Action::SetupFieldChange(props.field, value);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    vec![]
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    vec![]
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    vec![change(String::new())]
                }
                _ => vec![],
            };
        }

        match key.code {
            KeyCode::Char(c) => vec![change(self.insert(props.value, c))],
            KeyCode::Backspace => self.backspace(props.value).map(change).into_iter().collect(),
            KeyCode::Delete => self.delete(props.value).map(change).into_iter().collect(),
            KeyCode::Left => {
                self.cursor = self.prev_boundary(props.value);
                vec![]
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary(props.value);
                vec![]
            }
            KeyCode::Home => {
                self.cursor = 0;
                vec![]
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                vec![]
            }
            KeyCode::Enter => vec![Action::SetupSubmit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", props.field.label()));

        let content = if props.value.is_empty() {
            Line::from(Span::styled("(empty)", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(Self::display(props.field, props.value))
        };

        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(content).block(block), area);

        if props.is_focused && inner.width > 0 {
            let column = props.value[..self.cursor].chars().count() as u16;
            if column < inner.width {
                frame.set_cursor_position((inner.x + column, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, ActionAssertions, RenderHarness};

    fn props(value: &str) -> CredentialInputProps<'_> {
        CredentialInputProps {
            field: SetupField::WeatherKey,
            value,
            is_focused: true,
        }
    }

    #[test]
    fn test_typing() {
        let mut input = CredentialInput::new();
        let actions = input.handle_event(&EventKind::Key(key("a")), props(""));
        actions.assert_first(Action::SetupFieldChange(SetupField::WeatherKey, "a".into()));
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut input = CredentialInput::new();
        input.cursor = 2;
        let actions = input.handle_event(&EventKind::Key(key("x")), props("abcd"));
        actions.assert_first(Action::SetupFieldChange(
            SetupField::WeatherKey,
            "abxcd".into(),
        ));
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_backspace() {
        let mut input = CredentialInput::new();
        input.cursor = 5;
        let actions = input.handle_event(&EventKind::Key(key("backspace")), props("hello"));
        actions.assert_first(Action::SetupFieldChange(SetupField::WeatherKey, "hell".into()));
        assert_eq!(input.cursor, 4);

        input.cursor = 0;
        input
            .handle_event(&EventKind::Key(key("backspace")), props("hello"))
            .assert_empty();
    }

    #[test]
    fn test_delete_multibyte() {
        let mut input = CredentialInput::new();
        input.cursor = 1;
        let actions = input.handle_event(&EventKind::Key(key("delete")), props("aéb"));
        actions.assert_first(Action::SetupFieldChange(SetupField::WeatherKey, "ab".into()));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = CredentialInput::new();
        let actions = input.handle_event(&EventKind::Key(key("ctrl+u")), props("key"));
        actions.assert_first(Action::SetupFieldChange(SetupField::WeatherKey, String::new()));
    }

    #[test]
    fn test_enter_submits() {
        let mut input = CredentialInput::new();
        let actions = input.handle_event(&EventKind::Key(key("enter")), props("key"));
        actions.assert_first(Action::SetupSubmit);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut input = CredentialInput::new();
        let actions = input.handle_event(
            &EventKind::Key(key("a")),
            CredentialInputProps {
                is_focused: false,
                ..props("")
            },
        );
        actions.assert_empty();
    }

    #[test]
    fn test_secret_is_masked() {
        let mut render = RenderHarness::new(40, 3);
        let mut input = CredentialInput::new();
        let output = render.render_to_string_plain(|frame| {
            input.render(
                frame,
                frame.area(),
                CredentialInputProps {
                    field: SetupField::PlacesSecret,
                    value: "hunter2",
                    is_focused: false,
                },
            );
        });
        assert!(output.contains("Places client secret"));
        assert!(output.contains("•••••••"));
        assert!(!output.contains("hunter2"));
    }
}
