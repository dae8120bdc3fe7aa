//! Map session: viewport, venue markers and the single open popup
//!
//! The session is created once a position is known and lives for the rest of
//! the run. Markers accumulate across refreshes, keyed by venue id, so an
//! open popup stays attached to its marker when the viewport moves and new
//! venues arrive.
//!
//! Refresh scheduling is not owned here: moving the center reports whether
//! it changed, and the caller debounces the venue refresh.

use crate::coord::{Coordinate, DEFAULT_CENTER};
use crate::venues::Venue;

/// Zoom used when none is requested.
pub const DEFAULT_ZOOM: u8 = 16;
/// Zoom used for venue browsing after a successful location fix.
pub const VENUE_ZOOM: u8 = 14;
pub const MIN_ZOOM: u8 = 3;
pub const MAX_ZOOM: u8 = 19;

/// Fraction of the visible span moved by one pan step.
const PAN_FRACTION: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanDirection {
    North,
    South,
    East,
    West,
}

/// Visible area in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    pub fn contains(&self, c: Coordinate) -> bool {
        c.lng >= self.west && c.lng <= self.east && c.lat >= self.south && c.lat <= self.north
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapSession {
    center: Coordinate,
    zoom: u8,
    markers: Vec<Venue>,
    open_popup: Option<String>,
    selected: Option<usize>,
}

impl MapSession {
    /// Create a session centered on `center` (default center when `None`) at
    /// `zoom` ([`DEFAULT_ZOOM`] when `None`).
    pub fn create(center: Option<Coordinate>, zoom: Option<u8>) -> Self {
        Self {
            center: center.unwrap_or(DEFAULT_CENTER),
            zoom: zoom.unwrap_or(DEFAULT_ZOOM).clamp(MIN_ZOOM, MAX_ZOOM),
            markers: Vec::new(),
            open_popup: None,
            selected: None,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Degrees of longitude across the viewport.
    pub fn lng_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom)
    }

    /// Degrees of latitude across the viewport.
    pub fn lat_span(&self) -> f64 {
        self.lng_span() / 2.0
    }

    pub fn bounds(&self) -> Bounds {
        let half_lng = self.lng_span() / 2.0;
        let half_lat = self.lat_span() / 2.0;
        Bounds {
            west: self.center.lng - half_lng,
            east: self.center.lng + half_lng,
            south: self.center.lat - half_lat,
            north: self.center.lat + half_lat,
        }
    }

    /// Move the center. Returns `true` when it actually changed.
    pub fn set_center(&mut self, center: Coordinate) -> bool {
        if center == self.center {
            return false;
        }
        self.center = center;
        true
    }

    /// Pan a quarter of the viewport in `direction`.
    pub fn pan(&mut self, direction: PanDirection) -> bool {
        let (d_lat, d_lng) = match direction {
            PanDirection::North => (self.lat_span() * PAN_FRACTION, 0.0),
            PanDirection::South => (-self.lat_span() * PAN_FRACTION, 0.0),
            PanDirection::East => (0.0, self.lng_span() * PAN_FRACTION),
            PanDirection::West => (0.0, -self.lng_span() * PAN_FRACTION),
        };
        self.set_center(self.center.offset(d_lat, d_lng))
    }

    /// Change zoom by `delta` levels within the allowed range.
    pub fn zoom_by(&mut self, delta: i8) -> bool {
        let zoom = (i16::from(self.zoom) + i16::from(delta))
            .clamp(i16::from(MIN_ZOOM), i16::from(MAX_ZOOM)) as u8;
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        true
    }

    pub fn markers(&self) -> &[Venue] {
        &self.markers
    }

    pub fn marker(&self, id: &str) -> Option<&Venue> {
        self.markers.iter().find(|v| v.id == id)
    }

    /// Add a marker per venue, replacing markers with the same id.
    /// Returns how many new markers were created.
    pub fn add_markers(&mut self, venues: Vec<Venue>) -> usize {
        let mut added = 0;
        for venue in venues {
            match self.markers.iter_mut().find(|m| m.id == venue.id) {
                Some(existing) => *existing = venue,
                None => {
                    self.markers.push(venue);
                    added += 1;
                }
            }
        }
        added
    }

    /// Open the popup of marker `id`, closing whichever popup was open.
    ///
    /// Returns the id of the popup that was closed. Unknown ids leave the
    /// session untouched.
    pub fn open_popup(&mut self, id: &str) -> Option<String> {
        if self.marker(id).is_none() {
            return None;
        }
        let previous = self.open_popup.take().filter(|prev| prev != id);
        self.open_popup = Some(id.to_string());
        previous
    }

    /// Close the open popup, if any. Returns `true` when one was closed.
    pub fn close_popup(&mut self) -> bool {
        self.open_popup.take().is_some()
    }

    pub fn open_popup_id(&self) -> Option<&str> {
        self.open_popup.as_deref()
    }

    pub fn open_popup_venue(&self) -> Option<&Venue> {
        self.open_popup.as_deref().and_then(|id| self.marker(id))
    }

    pub fn selected(&self) -> Option<&Venue> {
        self.selected.and_then(|i| self.markers.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select the marker with `id`. Returns `true` when the selection moved.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(index) = self.markers.iter().position(|m| m.id == id) else {
            return false;
        };
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        changed
    }

    /// Move the marker selection by `step`, wrapping around.
    pub fn select_step(&mut self, step: isize) -> bool {
        let len = self.markers.len();
        if len == 0 {
            return false;
        }
        let next = match self.selected {
            None if step >= 0 => 0,
            None => len - 1,
            Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
        };
        let changed = self.selected != Some(next);
        self.selected = Some(next);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(id: &str, lat: f64, lng: f64) -> Venue {
        Venue {
            id: id.into(),
            name: format!("Venue {id}"),
            coordinate: Coordinate::new(lat, lng),
            tips: vec![],
        }
    }

    #[test]
    fn test_create_defaults() {
        let map = MapSession::create(None, None);
        assert_eq!(map.center(), DEFAULT_CENTER);
        assert_eq!(map.zoom(), DEFAULT_ZOOM);

        let here = Coordinate::new(1.0, 2.0);
        let map = MapSession::create(Some(here), Some(VENUE_ZOOM));
        assert_eq!(map.center(), here);
        assert_eq!(map.zoom(), VENUE_ZOOM);
    }

    #[test]
    fn test_only_one_popup_open() {
        let mut map = MapSession::create(None, None);
        map.add_markers(vec![venue("a", 0.0, 0.0), venue("b", 0.0, 0.0)]);

        assert_eq!(map.open_popup("a"), None);
        assert_eq!(map.open_popup_id(), Some("a"));

        assert_eq!(map.open_popup("b"), Some("a".to_string()));
        assert_eq!(map.open_popup_id(), Some("b"));

        // Reopening the same popup closes nothing.
        assert_eq!(map.open_popup("b"), None);
        assert_eq!(map.open_popup_id(), Some("b"));
    }

    #[test]
    fn test_open_unknown_popup_is_ignored() {
        let mut map = MapSession::create(None, None);
        map.add_markers(vec![venue("a", 0.0, 0.0)]);
        map.open_popup("a");
        assert_eq!(map.open_popup("zzz"), None);
        assert_eq!(map.open_popup_id(), Some("a"));
    }

    #[test]
    fn test_close_popup() {
        let mut map = MapSession::create(None, None);
        assert!(!map.close_popup());
        map.add_markers(vec![venue("a", 0.0, 0.0)]);
        map.open_popup("a");
        assert!(map.close_popup());
        assert!(map.open_popup_venue().is_none());
    }

    #[test]
    fn test_markers_dedupe_and_keep_popup() {
        let mut map = MapSession::create(None, None);
        assert_eq!(map.add_markers(vec![venue("a", 0.0, 0.0)]), 1);
        map.open_popup("a");

        let mut renamed = venue("a", 0.0, 0.0);
        renamed.name = "Renamed".into();
        assert_eq!(map.add_markers(vec![renamed, venue("b", 1.0, 1.0)]), 1);

        assert_eq!(map.markers().len(), 2);
        assert_eq!(map.open_popup_venue().map(|v| v.name.as_str()), Some("Renamed"));
    }

    #[test]
    fn test_pan_moves_center() {
        let mut map = MapSession::create(Some(Coordinate::new(0.0, 0.0)), Some(10));
        assert!(map.pan(PanDirection::East));
        assert!(map.center().lng > 0.0);
        assert!(map.pan(PanDirection::North));
        assert!(map.center().lat > 0.0);
        assert!(map.bounds().contains(map.center()));
    }

    #[test]
    fn test_set_center_reports_change() {
        let mut map = MapSession::create(None, None);
        assert!(!map.set_center(DEFAULT_CENTER));
        assert!(map.set_center(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut map = MapSession::create(None, Some(MAX_ZOOM));
        assert!(!map.zoom_by(1));
        assert!(map.zoom_by(-2));
        assert_eq!(map.zoom(), MAX_ZOOM - 2);

        let span = map.lng_span();
        map.zoom_by(1);
        assert!((map.lng_span() * 2.0 - span).abs() < 1e-12);
    }

    #[test]
    fn test_selection_wraps() {
        let mut map = MapSession::create(None, None);
        assert!(!map.select_step(1));
        map.add_markers(vec![venue("a", 0.0, 0.0), venue("b", 0.0, 0.0)]);
        map.select_step(1);
        assert_eq!(map.selected().map(|v| v.id.as_str()), Some("a"));
        map.select_step(1);
        assert_eq!(map.selected().map(|v| v.id.as_str()), Some("b"));
        map.select_step(1);
        assert_eq!(map.selected().map(|v| v.id.as_str()), Some("a"));
        map.select_step(-1);
        assert_eq!(map.selected().map(|v| v.id.as_str()), Some("b"));

        assert!(map.select("a"));
        assert!(!map.select("a"));
        assert!(!map.select("missing"));
        assert_eq!(map.selected_index(), Some(0));
    }
}
