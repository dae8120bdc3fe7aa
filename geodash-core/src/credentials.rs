//! Provider API credentials

use std::fmt;

/// Keys for the three providers, entered once per session.
///
/// An empty value disables the provider that needs it: no request is made.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub places_client_id: String,
    pub places_client_secret: String,
    pub weather_key: String,
    pub news_key: String,
}

impl Credentials {
    pub fn has_places(&self) -> bool {
        !self.places_client_id.is_empty() && !self.places_client_secret.is_empty()
    }

    pub fn has_weather(&self) -> bool {
        !self.weather_key.is_empty()
    }

    pub fn has_news(&self) -> bool {
        !self.news_key.is_empty()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "<empty>" } else { "<set>" }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("places_client_id", &redact(&self.places_client_id))
            .field("places_client_secret", &redact(&self.places_client_secret))
            .field("weather_key", &redact(&self.weather_key))
            .field("news_key", &redact(&self.news_key))
            .finish()
    }
}
