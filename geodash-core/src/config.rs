//! Provider endpoints and fixed request parameters

/// Venue explore API version pinned by the client.
pub const VENUES_API_VERSION: &str = "20161001";

/// Static news query issued on every refresh.
pub const NEWS_QUERY: &str = "local news";
pub const NEWS_COUNT: u32 = 10;
pub const NEWS_OFFSET: u32 = 0;
pub const NEWS_MARKET: &str = "en-us";
pub const NEWS_SAFE_SEARCH: &str = "Moderate";

/// Header carrying the news provider key.
pub const NEWS_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Base URLs for each provider.
///
/// Only the scheme and host are configurable; paths are fixed by the clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub venues: String,
    pub weather: String,
    pub news: String,
    pub geoip: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            venues: "https://api.foursquare.com".into(),
            weather: "http://api.openweathermap.org".into(),
            news: "https://api.cognitive.microsoft.com".into(),
            geoip: "https://ipapi.co".into(),
        }
    }
}

impl Endpoints {
    pub fn venues_explore(&self) -> String {
        format!("{}/v2/venues/explore", self.venues.trim_end_matches('/'))
    }

    pub fn current_weather(&self) -> String {
        format!("{}/data/2.5/weather", self.weather.trim_end_matches('/'))
    }

    pub fn news_search(&self) -> String {
        format!("{}/bing/v5.0/news/search", self.news.trim_end_matches('/'))
    }

    pub fn geoip_lookup(&self) -> String {
        format!("{}/json/", self.geoip.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_ignore_trailing_slash() {
        let endpoints = Endpoints {
            weather: "http://localhost:8080/".into(),
            ..Default::default()
        };
        assert_eq!(
            endpoints.current_weather(),
            "http://localhost:8080/data/2.5/weather"
        );
    }

    #[test]
    fn test_default_paths() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.venues_explore(),
            "https://api.foursquare.com/v2/venues/explore"
        );
        assert_eq!(
            endpoints.news_search(),
            "https://api.cognitive.microsoft.com/bing/v5.0/news/search"
        );
    }
}
