//! Actions
//!
//! Naming follows the category-prefix convention: `MapPan` and `MapZoom`
//! belong to "map", `WeatherDidLoad` to "weather". A `Did` infix marks the
//! result of an async task.

use geodash_core::{NewsArticle, PanDirection, Resolution, Venue, WeatherSnapshot};

use crate::state::SetupField;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Setup =====
    /// A credential field was edited
    SetupFieldChange(SetupField, String),
    SetupFocusNext,
    SetupFocusPrev,
    /// Credentials entered, show the dashboard and start loading
    SetupSubmit,

    // ===== Location =====
    /// Result: position resolved (possibly the fallback)
    LocateDidResolve(Resolution),

    // ===== Map =====
    MapPan(PanDirection),
    MapZoom(i8),
    /// Move the map back to the resolved position
    MapRecenter,
    /// Click on the map outside any marker, or Esc
    MapBackgroundClick,
    MapSelectStep(isize),
    /// Marker clicked (or selected marker activated)
    MapOpenPopup(String),

    // ===== Venues =====
    VenuesDidLoad {
        seq: u64,
        venues: Option<Vec<Venue>>,
    },
    VenuesDidFail {
        seq: u64,
        error: String,
    },

    // ===== Weather =====
    WeatherFetch,
    WeatherDidLoad {
        seq: u64,
        snapshot: Option<WeatherSnapshot>,
    },
    WeatherDidFail {
        seq: u64,
        error: String,
    },

    // ===== News =====
    NewsFetch,
    NewsDidLoad {
        seq: u64,
        articles: Option<Vec<NewsArticle>>,
    },
    NewsDidFail {
        seq: u64,
        error: String,
    },
    NewsScroll(isize),

    // ===== UI =====
    /// Cycle the displayed temperature unit
    UiCycleUnits,
    UiDismissNotice,
    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Refresh weather, news and venues for the current view
    RefreshAll,
    Quit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetupFieldChange(..) => "SetupFieldChange",
            Action::SetupFocusNext => "SetupFocusNext",
            Action::SetupFocusPrev => "SetupFocusPrev",
            Action::SetupSubmit => "SetupSubmit",
            Action::LocateDidResolve(_) => "LocateDidResolve",
            Action::MapPan(_) => "MapPan",
            Action::MapZoom(_) => "MapZoom",
            Action::MapRecenter => "MapRecenter",
            Action::MapBackgroundClick => "MapBackgroundClick",
            Action::MapSelectStep(_) => "MapSelectStep",
            Action::MapOpenPopup(_) => "MapOpenPopup",
            Action::VenuesDidLoad { .. } => "VenuesDidLoad",
            Action::VenuesDidFail { .. } => "VenuesDidFail",
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidFail { .. } => "WeatherDidFail",
            Action::NewsFetch => "NewsFetch",
            Action::NewsDidLoad { .. } => "NewsDidLoad",
            Action::NewsDidFail { .. } => "NewsDidFail",
            Action::NewsScroll(_) => "NewsScroll",
            Action::UiCycleUnits => "UiCycleUnits",
            Action::UiDismissNotice => "UiDismissNotice",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::RefreshAll => "RefreshAll",
            Action::Quit => "Quit",
        }
    }

    /// Category inferred from the name prefix. Global actions have none.
    pub fn category(&self) -> Option<&'static str> {
        const PREFIXES: [(&str, &str); 7] = [
            ("Setup", "setup"),
            ("Locate", "location"),
            ("Map", "map"),
            ("Venues", "venues"),
            ("Weather", "weather"),
            ("News", "news"),
            ("Ui", "ui"),
        ];
        let name = self.name();
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, category)| *category)
    }

    /// Whether this action carries the result of an async task.
    pub fn is_async_result(&self) -> bool {
        self.name().contains("Did")
    }

    /// Concise form for logs. Data-heavy payloads are reduced to counts and
    /// secrets never appear.
    pub fn summary(&self) -> String {
        match self {
            // Every setup field holds a credential, masked on screen or not.
            Action::SetupFieldChange(field, value) => {
                let shown = "*".repeat(value.chars().count());
                format!("SetupFieldChange({field:?}, {shown:?})")
            }
            Action::LocateDidResolve(r) => format!(
                "LocateDidResolve {{ at: {}, fallback: {} }}",
                r.coordinate,
                r.is_fallback()
            ),
            Action::VenuesDidLoad { seq, venues } => format!(
                "VenuesDidLoad {{ seq: {seq}, venues: {} }}",
                venues.as_ref().map_or(0, Vec::len)
            ),
            Action::WeatherDidLoad { seq, snapshot } => match snapshot {
                Some(s) => format!("WeatherDidLoad {{ seq: {seq}, temp: {:.1}°F }}", s.temp),
                None => format!("WeatherDidLoad {{ seq: {seq}, empty }}"),
            },
            Action::NewsDidLoad { seq, articles } => format!(
                "NewsDidLoad {{ seq: {seq}, articles: {} }}",
                articles.as_ref().map_or(0, Vec::len)
            ),
            Action::VenuesDidFail { seq, error }
            | Action::WeatherDidFail { seq, error }
            | Action::NewsDidFail { seq, error } => {
                format!("{} {{ seq: {seq}, error: {:?} }}", self.name(), truncate(error, 40))
            }
            _ => format!("{self:?}"),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.to_string()
    }
}
