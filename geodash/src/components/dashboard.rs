//! Main page: header, map, weather, news and status bar

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{
    Component, Header, HeaderProps, MapView, MapViewProps, NewsList, NewsListProps, StatusBar,
    StatusBarProps, VenuePopup, VenuePopupProps, WeatherPanel, WeatherPanelProps,
};
use crate::action::Action;
use crate::event::EventKind;
use crate::state::DashboardState;

/// Rows taken by the weather panel once a snapshot exists
const WEATHER_HEIGHT: u16 = 7;

pub struct DashboardProps<'a> {
    pub state: &'a DashboardState,
}

#[derive(Default)]
pub struct Dashboard {
    map: MapView,
    news: NewsList,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn global_key(event: &EventKind, state: &DashboardState) -> Option<Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::UiCycleUnits),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::RefreshAll),
            KeyCode::Char('d') if state.notice.is_some() => Some(Action::UiDismissNotice),
            KeyCode::Char('J') | KeyCode::PageDown => Some(Action::NewsScroll(1)),
            KeyCode::Char('K') | KeyCode::PageUp => Some(Action::NewsScroll(-1)),
            _ => None,
        }
    }
}

impl Component for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        let state = props.state;
        if let Some(action) = Self::global_key(event, state) {
            return vec![action];
        }

        if let Some(map) = &state.map {
            let actions = self.map.handle_event(
                event,
                MapViewProps {
                    map,
                    banner: state.banner.as_deref(),
                    is_focused: true,
                },
            );
            if !actions.is_empty() {
                return actions;
            }
        }

        self.news.handle_event(
            event,
            NewsListProps {
                articles: &state.news,
                scroll: state.news_scroll,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let [header_area, body, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);
        let [map_area, side] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        let weather_height = if state.weather.is_some() {
            WEATHER_HEIGHT
        } else {
            0
        };
        let [weather_area, news_area] =
            Layout::vertical([Constraint::Length(weather_height), Constraint::Min(3)]).areas(side);

        Header.render(
            frame,
            header_area,
            HeaderProps {
                position: state.position,
                locating: state.locating,
                unit: state.unit,
            },
        );

        match &state.map {
            Some(map) => {
                self.map.render(
                    frame,
                    map_area,
                    MapViewProps {
                        map,
                        banner: state.banner.as_deref(),
                        is_focused: true,
                    },
                );
                if let Some(venue) = map.open_popup_venue() {
                    let content = venue.popup();
                    VenuePopup.render(frame, map_area, VenuePopupProps { content: &content });
                }
            }
            None => {
                let text = if state.locating {
                    "Finding your position…"
                } else {
                    "No position yet"
                };
                frame.render_widget(
                    Paragraph::new(text)
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center)
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
                                .title(" Map "),
                        ),
                    map_area,
                );
            }
        }

        if let Some(snapshot) = &state.weather {
            WeatherPanel.render(
                frame,
                weather_area,
                WeatherPanelProps {
                    snapshot,
                    unit: state.unit,
                },
            );
        }

        self.news.render(
            frame,
            news_area,
            NewsListProps {
                articles: &state.news,
                scroll: state.news_scroll,
            },
        );

        StatusBar.render(
            frame,
            status_area,
            StatusBarProps {
                notice: state.notice.as_ref(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Notice, Page, Provider};
    use crate::testing::{key, ActionAssertions, RenderHarness};
    use geodash_core::{Coordinate, MapSession, PanDirection};

    fn main_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.page = Page::Main;
        state.position = Some(Coordinate::new(43.0747, -89.3843));
        state.map = Some(MapSession::create(state.position, None));
        state
    }

    #[test]
    fn test_global_keys() {
        let mut dashboard = Dashboard::new();
        let state = main_state();
        let props = || DashboardProps { state: &state };

        dashboard
            .handle_event(&EventKind::Key(key("q")), props())
            .assert_first(Action::Quit);
        dashboard
            .handle_event(&EventKind::Key(key("ctrl+c")), props())
            .assert_first(Action::Quit);
        dashboard
            .handle_event(&EventKind::Key(key("u")), props())
            .assert_first(Action::UiCycleUnits);
        dashboard
            .handle_event(&EventKind::Key(key("r")), props())
            .assert_first(Action::RefreshAll);
        dashboard
            .handle_event(&EventKind::Key(key("pagedown")), props())
            .assert_first(Action::NewsScroll(1));
    }

    #[test]
    fn test_dismiss_needs_notice() {
        let mut dashboard = Dashboard::new();
        let mut state = main_state();

        dashboard
            .handle_event(&EventKind::Key(key("d")), DashboardProps { state: &state })
            .assert_empty();

        state.notice = Some(Notice::new(Provider::News, "offline"));
        dashboard
            .handle_event(&EventKind::Key(key("d")), DashboardProps { state: &state })
            .assert_first(Action::UiDismissNotice);
    }

    #[test]
    fn test_map_keys_reach_map() {
        let mut dashboard = Dashboard::new();
        let state = main_state();

        dashboard
            .handle_event(&EventKind::Key(key("up")), DashboardProps { state: &state })
            .assert_first(Action::MapPan(PanDirection::North));
    }

    #[test]
    fn test_map_keys_ignored_without_map() {
        let mut dashboard = Dashboard::new();
        let mut state = main_state();
        state.map = None;

        dashboard
            .handle_event(&EventKind::Key(key("up")), DashboardProps { state: &state })
            .assert_empty();
    }

    #[test]
    fn test_render_locating_placeholder() {
        let mut render = RenderHarness::new(100, 30);
        let mut dashboard = Dashboard::new();
        let mut state = main_state();
        state.map = None;
        state.position = None;
        state.locating = true;

        let output = render.render_to_string_plain(|frame| {
            dashboard.render(frame, frame.area(), DashboardProps { state: &state });
        });

        assert!(output.contains("locating…"));
        assert!(output.contains("Finding your position…"));
        assert!(!output.contains("Weather"));
    }
}
