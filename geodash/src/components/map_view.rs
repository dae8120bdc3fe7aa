//! Map canvas with venue markers
//!
//! The viewport comes from [`MapSession::bounds`]. Markers are drawn as
//! labels on a braille canvas over the world outline; clicks are hit-tested
//! against the cell each marker was drawn in.

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use geodash_core::{Coordinate, MapSession, PanDirection, Venue};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::{contains, Component};
use crate::action::Action;
use crate::event::EventKind;

pub const MARKER: &str = "●";
pub const SELECTED_MARKER: &str = "◉";

pub struct MapViewProps<'a> {
    pub map: &'a MapSession,
    /// Location fallback message shown under the map
    pub banner: Option<&'a str>,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct MapView {
    /// Canvas area from the last render, for mouse hit-testing
    canvas_area: Option<Rect>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas_area(&self) -> Option<Rect> {
        self.canvas_area
    }
}

/// Terminal cell a coordinate is drawn in, if it is in view.
pub fn marker_cell(map: &MapSession, area: Rect, at: Coordinate) -> Option<(u16, u16)> {
    let bounds = map.bounds();
    if area.width == 0 || area.height == 0 || !bounds.contains(at) {
        return None;
    }
    let x = (at.lng - bounds.west) * f64::from(area.width - 1) / (bounds.east - bounds.west);
    let y = (bounds.north - at.lat) * f64::from(area.height - 1) / (bounds.north - bounds.south);
    Some((area.x + x as u16, area.y + y as u16))
}

/// Marker closest to a click, within one cell.
pub fn marker_at(map: &MapSession, area: Rect, column: u16, row: u16) -> Option<&Venue> {
    map.markers()
        .iter()
        .filter_map(|venue| {
            let (x, y) = marker_cell(map, area, venue.coordinate)?;
            let distance = x.abs_diff(column) + y.abs_diff(row);
            (distance <= 1).then_some((venue, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(venue, _)| venue)
}

impl Component for MapView {
    type Props<'a> = MapViewProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        match event {
            EventKind::Key(key) if props.is_focused => match key.code {
                KeyCode::Up | KeyCode::Char('k') => vec![Action::MapPan(PanDirection::North)],
                KeyCode::Down | KeyCode::Char('j') => vec![Action::MapPan(PanDirection::South)],
                KeyCode::Left | KeyCode::Char('h') => vec![Action::MapPan(PanDirection::West)],
                KeyCode::Right | KeyCode::Char('l') => vec![Action::MapPan(PanDirection::East)],
                KeyCode::Char('+') | KeyCode::Char('=') => vec![Action::MapZoom(1)],
                KeyCode::Char('-') => vec![Action::MapZoom(-1)],
                KeyCode::Char('c') => vec![Action::MapRecenter],
                KeyCode::Tab | KeyCode::Char('n') => vec![Action::MapSelectStep(1)],
                KeyCode::BackTab | KeyCode::Char('p') => vec![Action::MapSelectStep(-1)],
                KeyCode::Enter => props
                    .map
                    .selected()
                    .map(|v| Action::MapOpenPopup(v.id.clone()))
                    .into_iter()
                    .collect(),
                KeyCode::Esc if props.map.open_popup_id().is_some() => {
                    vec![Action::MapBackgroundClick]
                }
                _ => vec![],
            },

            EventKind::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                let Some(area) = self.canvas_area else {
                    return vec![];
                };
                if !contains(area, mouse.column, mouse.row) {
                    return vec![];
                }
                match marker_at(props.map, area, mouse.column, mouse.row) {
                    Some(venue) => vec![Action::MapOpenPopup(venue.id.clone())],
                    None if props.map.open_popup_id().is_some() => {
                        vec![Action::MapBackgroundClick]
                    }
                    None => vec![],
                }
            }

            EventKind::Scroll { column, row, delta } => match self.canvas_area {
                Some(area) if contains(area, *column, *row) => {
                    vec![Action::MapZoom(if *delta > 0 { -1 } else { 1 })]
                }
                _ => vec![],
            },

            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let map = props.map;
        let [map_area, banner_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(u16::from(props.banner.is_some())),
        ])
        .areas(area);

        let footer = match map.selected() {
            Some(venue) => Line::from(format!(" {SELECTED_MARKER} {} ", venue.name)),
            None => Line::from(" Tab select · Enter open ").fg(Color::DarkGray),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Rgb(80, 80, 100))
            })
            .title(format!(
                " Map · zoom {} · {} venues ",
                map.zoom(),
                map.markers().len()
            ))
            .title_bottom(footer);
        self.canvas_area = Some(block.inner(map_area));

        let bounds = map.bounds();
        let center = map.center();
        let selected = map.selected_index();
        let open = map.open_popup_id();
        let markers: Vec<(Coordinate, Span<'static>)> = map
            .markers()
            .iter()
            .enumerate()
            .map(|(i, venue)| {
                let span = if Some(i) == selected {
                    Span::styled(
                        format!("{SELECTED_MARKER} {}", venue.name),
                        Style::default().fg(Color::Yellow).bold(),
                    )
                } else if Some(venue.id.as_str()) == open {
                    Span::styled(MARKER, Style::default().fg(Color::Magenta).bold())
                } else {
                    Span::styled(MARKER, Style::default().fg(Color::Red))
                };
                (venue.coordinate, span)
            })
            .collect();

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([bounds.west, bounds.east])
            .y_bounds([bounds.south, bounds.north])
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.print(
                    center.lng,
                    center.lat,
                    Span::styled("+", Style::default().fg(Color::Cyan)),
                );
                for (at, span) in &markers {
                    ctx.print(at.lng, at.lat, span.clone());
                }
            });
        frame.render_widget(canvas, map_area);

        if let Some(banner) = props.banner {
            frame.render_widget(
                Paragraph::new(banner).style(Style::default().fg(Color::Red)),
                banner_area,
            );
        }
    }
}
