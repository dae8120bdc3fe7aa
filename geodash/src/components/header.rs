use geodash_core::{Coordinate, TempUnit};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;

pub const LOCATION_ICON: &str = "◎ ";

pub struct HeaderProps {
    pub position: Option<Coordinate>,
    pub locating: bool,
    pub unit: TempUnit,
}

pub struct Header;

impl Component for Header {
    type Props<'a> = HeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let place = match (props.position, props.locating) {
            (_, true) => Span::styled("locating…", Style::default().fg(Color::Yellow)),
            (Some(at), false) => Span::styled(at.to_string(), Style::default().fg(Color::White)),
            (None, false) => Span::styled("position unknown", Style::default().fg(Color::DarkGray)),
        };

        let line = Line::from(vec![
            Span::styled(" geodash ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(LOCATION_ICON, Style::default().fg(Color::Red)),
            place,
            Span::styled(
                format!("  [{}]", props.unit.suffix()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(Color::Rgb(30, 30, 40))),
            area,
        );
    }
}
