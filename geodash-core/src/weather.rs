//! Current-conditions client and display formatting

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::coord::Coordinate;
use crate::credentials::Credentials;
use crate::transport::{ApiError, HttpRequest, Transport};
use crate::units::{convert, TempUnit};

/// Unit the provider is asked to report temperatures in.
pub const SOURCE_UNIT: TempUnit = TempUnit::Fahrenheit;

#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    /// Provider icon code, e.g. `10d`
    pub icon: String,
    /// Short label, e.g. `Rain`
    pub label: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("http://openweathermap.org/img/w/{}.png", self.icon)
    }
}

/// Current conditions in [`SOURCE_UNIT`].
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub humidity: f64,
    pub wind_speed: Option<f64>,
    pub condition: Option<Condition>,
}

/// Display strings for each weather slot.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReadout {
    pub current: String,
    /// `None` clears the icon slot.
    pub condition: Option<Condition>,
    pub range: String,
    pub humidity: String,
    pub wind: String,
}

fn whole_degrees(value_f: f64, unit: TempUnit) -> i64 {
    convert(value_f, SOURCE_UNIT, unit).trunc() as i64
}

impl WeatherReadout {
    pub fn new(snapshot: &WeatherSnapshot, unit: TempUnit) -> Self {
        let suffix = unit.suffix();
        let high = whole_degrees(snapshot.temp_max, unit);
        let low = whole_degrees(snapshot.temp_min, unit);
        let range = if high == low {
            format!("-- / {low}{suffix}")
        } else {
            format!("{high}{suffix} / {low}{suffix}")
        };

        Self {
            current: format!("{}{}", whole_degrees(snapshot.temp, unit), suffix),
            condition: snapshot.condition.clone(),
            range,
            humidity: format!("{}%", snapshot.humidity),
            wind: match snapshot.wind_speed {
                Some(speed) => format!("{speed}mph"),
                None => "--".to_string(),
            },
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    main: Option<MainInfo>,
    #[serde(default)]
    weather: Vec<ConditionInfo>,
    wind: Option<WindInfo>,
}

#[derive(Debug, Deserialize)]
struct MainInfo {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    icon: String,
    main: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

/// Extract a snapshot. A payload without `main` yields `None`.
pub fn parse_weather(payload: Value) -> Option<WeatherSnapshot> {
    let payload: WeatherPayload = match serde_json::from_value(payload) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(error = %e, "weather payload has unexpected shape");
            return None;
        }
    };
    let main = payload.main?;

    Some(WeatherSnapshot {
        temp: main.temp,
        temp_max: main.temp_max,
        temp_min: main.temp_min,
        humidity: main.humidity,
        wind_speed: payload.wind.map(|w| w.speed),
        condition: payload.weather.into_iter().next().map(|c| Condition {
            icon: c.icon,
            label: c.main,
        }),
    })
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct WeatherClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> WeatherClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn request(&self, credentials: &Credentials, at: Coordinate) -> Option<HttpRequest> {
        if !credentials.has_weather() {
            return None;
        }
        Some(
            HttpRequest::get(self.endpoints.current_weather())
                .query("lat", at.lat.to_string())
                .query("lon", at.lng.to_string())
                .query("units", "imperial")
                .query("appid", credentials.weather_key.clone()),
        )
    }

    /// Fetch current conditions at `at`.
    ///
    /// `Ok(None)` means nothing was requested or the payload was incomplete.
    pub async fn current(
        &self,
        credentials: &Credentials,
        at: Coordinate,
    ) -> Result<Option<WeatherSnapshot>, ApiError> {
        let Some(request) = self.request(credentials, at) else {
            tracing::debug!("weather key missing, skipping weather refresh");
            return Ok(None);
        };
        let payload = self.transport.get_json(request).await?;
        Ok(parse_weather(payload))
    }
}
