//! Geographic coordinates

use std::fmt;

/// Fallback position used when the device location cannot be resolved.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 43.0747,
    lng: -89.3843,
};

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Shift by the given deltas, clamping latitude to the poles and
    /// wrapping longitude into [-180, 180).
    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        let lat = (self.lat + d_lat).clamp(-90.0, 90.0);
        let mut lng = (self.lng + d_lng + 180.0).rem_euclid(360.0) - 180.0;
        if lng == -180.0 && self.lng + d_lng > 0.0 {
            lng = 180.0;
        }
        Self { lat, lng }
    }

    /// `lat,lng` as used by the venue explore endpoint.
    pub fn to_ll(self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        DEFAULT_CENTER
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lng < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.lat.abs(),
            ns,
            self.lng.abs(),
            ew
        )
    }
}
