use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::state::Notice;

pub struct StatusBarProps<'a> {
    pub notice: Option<&'a Notice>,
}

/// Bottom row: the current provider notice, or the key help.
pub struct StatusBar;

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Cyan).bold()),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]
}

impl Component for StatusBar {
    type Props<'a> = StatusBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = match props.notice {
            Some(notice) => {
                let mut spans = vec![Span::styled(
                    format!(" ⚠ {notice} "),
                    Style::default().fg(Color::Red).bold(),
                )];
                spans.extend(hint("d", " dismiss"));
                Line::from(spans)
            }
            None => Line::from(
                [
                    hint(" ←↑↓→", " pan  "),
                    hint("+/-", " zoom  "),
                    hint("Tab", " venue  "),
                    hint("Enter", " tips  "),
                    hint("J/K", " news  "),
                    hint("u", " units  "),
                    hint("r", " refresh  "),
                    hint("q", " quit "),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>(),
            )
            .centered(),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
