//! Current conditions panel

use geodash_core::{TempUnit, WeatherReadout, WeatherSnapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;

pub struct WeatherPanelProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub unit: TempUnit,
}

pub struct WeatherPanel;

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

impl Component for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let readout = WeatherReadout::new(props.snapshot, props.unit);

        let (condition, icon) = match &readout.condition {
            Some(condition) => (condition.label.clone(), condition.icon_url()),
            None => (String::new(), String::new()),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(readout.current, Style::default().fg(Color::Yellow).bold()),
                Span::raw("  "),
                Span::styled(condition, Style::default().fg(Color::White)),
            ]),
            Line::from(Span::styled(icon, Style::default().fg(Color::DarkGray))),
            row("High/Low", readout.range),
            row("Humidity", readout.humidity),
            row("Wind", readout.wind),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" ☁ Weather ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
