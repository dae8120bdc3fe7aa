//! Dashboard state, the single source of truth
//!
//! Components read it through props; only the reducer mutates it.

use std::fmt;

use geodash_core::{Coordinate, Credentials, MapSession, NewsArticle, TempUnit, WeatherSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    /// Credential entry, shown until submitted
    #[default]
    Setup,
    /// Header, map, weather and news
    Main,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SetupField {
    #[default]
    PlacesId,
    PlacesSecret,
    WeatherKey,
    NewsKey,
}

impl SetupField {
    pub const ALL: [SetupField; 4] = [
        SetupField::PlacesId,
        SetupField::PlacesSecret,
        SetupField::WeatherKey,
        SetupField::NewsKey,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SetupField::PlacesId => "Places client id",
            SetupField::PlacesSecret => "Places client secret",
            SetupField::WeatherKey => "Weather API key",
            SetupField::NewsKey => "News API key",
        }
    }

    /// Values of secret fields are masked on screen. Logs mask every field.
    pub fn is_secret(self) -> bool {
        matches!(self, SetupField::PlacesSecret)
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The four credential inputs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SetupForm {
    values: [String; 4],
    pub focus: SetupField,
}

impl SetupForm {
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            values: [
                credentials.places_client_id.clone(),
                credentials.places_client_secret.clone(),
                credentials.weather_key.clone(),
                credentials.news_key.clone(),
            ],
            focus: SetupField::default(),
        }
    }

    pub fn value(&self, field: SetupField) -> &str {
        &self.values[field.index()]
    }

    /// Returns `true` when the value changed.
    pub fn set(&mut self, field: SetupField, value: String) -> bool {
        let slot = &mut self.values[field.index()];
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Inputs are copied as typed, trimmed of surrounding whitespace.
    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            places_client_id: self.value(SetupField::PlacesId).trim().to_string(),
            places_client_secret: self.value(SetupField::PlacesSecret).trim().to_string(),
            weather_key: self.value(SetupField::WeatherKey).trim().to_string(),
            news_key: self.value(SetupField::NewsKey).trim().to_string(),
        }
    }
}

impl fmt::Debug for SetupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupForm")
            .field("focus", &self.focus)
            .field("credentials", &self.to_credentials())
            .finish()
    }
}

/// Which provider a notice came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Venues,
    Weather,
    News,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::Venues => "venues",
            Provider::Weather => "weather",
            Provider::News => "news",
        }
    }
}

/// Non-blocking failure message shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub provider: Provider,
    pub message: String,
}

impl Notice {
    pub fn new(provider: Provider, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unavailable: {}", self.provider.label(), self.message)
    }
}

/// Latest request number per endpoint. Responses carrying an older number
/// are stale and get dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sequences {
    pub venues: u64,
    pub weather: u64,
    pub news: u64,
}

#[derive(Clone, Debug)]
pub struct DashboardState {
    pub page: Page,
    pub setup: SetupForm,
    /// Copied from the setup form on submit
    pub credentials: Credentials,

    /// Last resolved position (None until the first resolution)
    pub position: Option<Coordinate>,
    /// Shown under the map when the default center was substituted
    pub banner: Option<String>,
    pub locating: bool,

    /// Created once a position is known
    pub map: Option<MapSession>,

    /// Hidden until the first snapshot arrives
    pub weather: Option<WeatherSnapshot>,
    pub unit: TempUnit,

    pub news: Vec<NewsArticle>,
    pub news_scroll: usize,

    pub notice: Option<Notice>,
    pub seq: Sequences,
    pub terminal_size: (u16, u16),
}

impl DashboardState {
    /// Initial state with the setup form pre-filled from `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            page: Page::Setup,
            setup: SetupForm::from_credentials(&credentials),
            credentials: Credentials::default(),
            position: None,
            banner: None,
            locating: false,
            map: None,
            weather: None,
            unit: TempUnit::default(),
            news: Vec::new(),
            news_scroll: 0,
            notice: None,
            seq: Sequences::default(),
            terminal_size: (80, 24),
        }
    }

    pub fn is_setup(&self) -> bool {
        self.page == Page::Setup
    }

    pub fn popup_open(&self) -> bool {
        self.map
            .as_ref()
            .is_some_and(|m| m.open_popup_id().is_some())
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}
