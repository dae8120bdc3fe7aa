//! Device location with fallback
//!
//! [`resolve_location`] makes a single attempt through a [`Geolocator`]. Any
//! failure is absorbed: the default center is substituted and a banner
//! message is produced for the user, so callers always get a coordinate.

use std::future::Future;

use serde::Deserialize;

use crate::config::Endpoints;
use crate::coord::{Coordinate, DEFAULT_CENTER};
use crate::transport::{HttpRequest, Transport};

pub const DENIED_BANNER: &str =
    "The Geolocation service failed. Make sure to allow location access.";
pub const UNSUPPORTED_BANNER: &str = "Error: Your device doesn't support geolocation.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location lookup failed: {0}")]
    Failed(String),
    #[error("no location source available")]
    Unsupported,
}

impl LocationError {
    pub fn banner(&self) -> &'static str {
        match self {
            LocationError::Failed(_) => DENIED_BANNER,
            LocationError::Unsupported => UNSUPPORTED_BANNER,
        }
    }
}

/// A source of the user's current position.
pub trait Geolocator: Clone + Send + Sync + 'static {
    fn locate(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Outcome of [`resolve_location`].
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub coordinate: Coordinate,
    /// Message to show under the map when the fallback was used.
    pub banner: Option<String>,
}

impl Resolution {
    pub fn located(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            banner: None,
        }
    }

    pub fn fallback(error: &LocationError) -> Self {
        Self {
            coordinate: DEFAULT_CENTER,
            banner: Some(error.banner().to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.banner.is_some()
    }
}

/// Resolve the current position once, falling back to [`DEFAULT_CENTER`].
pub async fn resolve_location<G: Geolocator>(geolocator: &G) -> Resolution {
    match geolocator.locate().await {
        Ok(coordinate) => {
            tracing::info!(%coordinate, "location resolved");
            Resolution::located(coordinate)
        }
        Err(e) => {
            tracing::warn!(error = %e, "location unavailable, using default center");
            Resolution::fallback(&e)
        }
    }
}

/// Geolocator with a predetermined answer, e.g. a position given on the
/// command line.
#[derive(Clone, Debug)]
pub struct FixedGeolocator {
    answer: Result<Coordinate, LocationError>,
}

impl FixedGeolocator {
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            answer: Ok(coordinate),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            answer: Err(LocationError::Unsupported),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            answer: Err(LocationError::Failed(reason.into())),
        }
    }
}

impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        self.answer.clone()
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Approximate position from the public IP address.
#[derive(Clone, Debug)]
pub struct IpGeolocator<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> IpGeolocator<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }
}

impl<T: Transport> Geolocator for IpGeolocator<T> {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        let request = HttpRequest::get(self.endpoints.geoip_lookup());
        let payload = self
            .transport
            .get_json(request)
            .await
            .map_err(|e| LocationError::Failed(e.to_string()))?;

        let lookup: IpLookupResponse = serde_json::from_value(payload)
            .map_err(|e| LocationError::Failed(e.to_string()))?;

        match (lookup.latitude, lookup.longitude) {
            (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
            _ => Err(LocationError::Failed("lookup returned no coordinates".into())),
        }
    }
}

/// Either of the built-in geolocators, chosen at startup.
#[derive(Clone, Debug)]
pub enum AnyGeolocator<T> {
    Fixed(FixedGeolocator),
    Ip(IpGeolocator<T>),
}

impl<T: Transport> Geolocator for AnyGeolocator<T> {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        match self {
            AnyGeolocator::Fixed(g) => g.locate().await,
            AnyGeolocator::Ip(g) => g.locate().await,
        }
    }
}
