//! Top-level view: setup page until credentials are submitted, then the
//! dashboard.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::components::{Component, Dashboard, DashboardProps, SetupPage, SetupPageProps};
use crate::event::EventKind;
use crate::runtime::EventOutcome;
use crate::state::DashboardState;

#[derive(Default)]
pub struct App {
    setup: SetupPage,
    dashboard: Dashboard,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        if state.is_setup() {
            self.setup
                .render(frame, area, SetupPageProps { form: &state.setup });
        } else {
            self.dashboard.render(frame, area, DashboardProps { state });
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &DashboardState) -> EventOutcome {
        match event {
            EventKind::Resize(width, height) => {
                return EventOutcome::action(Action::UiTerminalResize(*width, *height))
                    .with_render();
            }
            EventKind::Key(key)
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return EventOutcome::action(Action::Quit);
            }
            _ => {}
        }

        if state.is_setup() {
            EventOutcome::from_actions(
                self.setup
                    .handle_event(event, SetupPageProps { form: &state.setup }),
            )
        } else {
            EventOutcome::from_actions(self.dashboard.handle_event(event, DashboardProps { state }))
        }
    }
}
