//! Credential entry page shown before the dashboard

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{centered_rect, Component, CredentialInput, CredentialInputProps};
use crate::action::Action;
use crate::event::EventKind;
use crate::state::{SetupField, SetupForm};

const FORM_WIDTH: u16 = 64;
const INPUT_HEIGHT: u16 = 3;

pub struct SetupPageProps<'a> {
    pub form: &'a SetupForm,
}

#[derive(Default)]
pub struct SetupPage {
    inputs: [CredentialInput; 4],
}

impl SetupPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for SetupPage {
    type Props<'a> = SetupPageProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Tab | KeyCode::Down => return vec![Action::SetupFocusNext],
                KeyCode::BackTab | KeyCode::Up => return vec![Action::SetupFocusPrev],
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return vec![Action::SetupSubmit];
                }
                _ => {}
            }
        }

        let focus = props.form.focus;
        self.inputs[focus as usize].handle_event(
            event,
            CredentialInputProps {
                field: focus,
                value: props.form.value(focus),
                is_focused: true,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let height = INPUT_HEIGHT * SetupField::ALL.len() as u16 + 6;
        let area = centered_rect(FORM_WIDTH, height, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" geodash · API keys ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(SetupField::ALL.iter().map(|_| Constraint::Length(INPUT_HEIGHT)));
        constraints.push(Constraint::Min(1));
        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(
            Paragraph::new("Keys stay in memory for this session only.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            rows[0],
        );

        for (i, field) in SetupField::ALL.into_iter().enumerate() {
            self.inputs[i].render(
                frame,
                rows[i + 1],
                CredentialInputProps {
                    field,
                    value: props.form.value(field),
                    is_focused: props.form.focus == field,
                },
            );
        }

        let hint = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" next  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" start  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" quit", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        if let Some(last) = rows.last() {
            frame.render_widget(Paragraph::new(hint), *last);
        }
    }
}
