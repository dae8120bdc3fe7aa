//! Core of the geodash dashboard
//!
//! Everything here is independent of the terminal UI:
//!
//! - [`location`]: one-shot position lookup with default-center fallback
//! - [`map`]: viewport, venue markers and the single open popup
//! - [`venues`], [`weather`], [`news`]: provider clients and the view data
//!   they produce
//! - [`units`]: temperature conversion
//! - [`transport`]: the HTTP seam every client goes through
//!
//! Clients take [`Credentials`] per call and make no request when the key
//! they need is empty.

pub mod config;
pub mod coord;
pub mod credentials;
pub mod html;
pub mod location;
pub mod map;
pub mod news;
pub mod testing;
pub mod transport;
pub mod units;
pub mod venues;
pub mod weather;

pub use config::Endpoints;
pub use coord::{Coordinate, DEFAULT_CENTER};
pub use credentials::Credentials;
pub use location::{
    resolve_location, AnyGeolocator, FixedGeolocator, Geolocator, IpGeolocator, LocationError,
    Resolution,
};
pub use map::{MapSession, PanDirection, DEFAULT_ZOOM, VENUE_ZOOM};
pub use news::{ArticleLayout, NewsArticle, NewsClient};
pub use transport::{ApiError, HttpRequest, ReqwestTransport, Transport};
pub use units::{convert, convert_symbols, TempUnit};
pub use venues::{PopupContent, Tip, Venue, VenueClient};
pub use weather::{Condition, WeatherClient, WeatherReadout, WeatherSnapshot};
