//! UI components
//!
//! Components render from read-only props and answer events with actions.
//! They may keep view-local state (cursor position, last drawn area), but
//! every data change goes through the reducer.

pub mod credential_input;
pub mod dashboard;
pub mod header;
pub mod map_view;
pub mod news_list;
pub mod popup;
pub mod setup_page;
pub mod status_bar;
pub mod weather_panel;

use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::event::EventKind;

pub use credential_input::{CredentialInput, CredentialInputProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use header::{Header, HeaderProps};
pub use map_view::{MapView, MapViewProps};
pub use news_list::{NewsList, NewsListProps};
pub use popup::{centered_rect, VenuePopup, VenuePopupProps};
pub use setup_page::{SetupPage, SetupPageProps};
pub use status_bar::{StatusBar, StatusBarProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};

pub trait Component {
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// Whether (`column`, `row`) lies inside `area`.
pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
