//! Reducer: `(state, action) -> DispatchResult`
//!
//! All state transitions happen here. Fetches are declared as effects and
//! gated on credentials, so an empty key never produces a task. Every fetch
//! bumps its endpoint's sequence number; results carrying an older number
//! are dropped.

use geodash_core::{Coordinate, MapSession, VENUE_ZOOM};

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::state::{DashboardState, Notice, Page, Provider};

pub fn reducer(state: &mut DashboardState, action: Action) -> DispatchResult {
    match action {
        // ===== Setup =====
        Action::SetupFieldChange(field, value) => {
            if !state.is_setup() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_if(state.setup.set(field, value))
        }

        Action::SetupFocusNext => {
            if !state.is_setup() {
                return DispatchResult::unchanged();
            }
            state.setup.focus = state.setup.focus.next();
            DispatchResult::changed()
        }

        Action::SetupFocusPrev => {
            if !state.is_setup() {
                return DispatchResult::unchanged();
            }
            state.setup.focus = state.setup.focus.prev();
            DispatchResult::changed()
        }

        Action::SetupSubmit => {
            if !state.is_setup() {
                return DispatchResult::unchanged();
            }
            state.credentials = state.setup.to_credentials();
            state.page = Page::Main;

            let result = DispatchResult::changed().with_opt(fetch_news(state));
            match state.position {
                Some(position) => {
                    if state.map.is_none() {
                        state.map = Some(MapSession::create(Some(position), Some(VENUE_ZOOM)));
                    }
                    result
                        .with_opt(fetch_weather(state, position))
                        .with_opt(fetch_venues(state, false))
                }
                None => {
                    state.locating = true;
                    result.with(Effect::Locate)
                }
            }
        }

        // ===== Location =====
        Action::LocateDidResolve(resolution) => {
            let at = resolution.coordinate;
            state.locating = false;
            state.position = Some(at);
            state.banner = resolution.banner.clone();
            if state.map.is_none() {
                // The fallback keeps the map's default zoom.
                let zoom = (!resolution.is_fallback()).then_some(VENUE_ZOOM);
                state.map = Some(MapSession::create(Some(at), zoom));
            }
            DispatchResult::changed()
                .with_opt(fetch_weather(state, at))
                .with_opt(fetch_venues(state, false))
        }

        // ===== Map =====
        Action::MapPan(direction) => {
            let Some(map) = state.map.as_mut() else {
                return DispatchResult::unchanged();
            };
            if !map.pan(direction) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed().with_opt(fetch_venues(state, true))
        }

        Action::MapZoom(delta) => {
            let Some(map) = state.map.as_mut() else {
                return DispatchResult::unchanged();
            };
            if !map.zoom_by(delta) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed().with_opt(fetch_venues(state, true))
        }

        Action::MapRecenter => {
            let (Some(map), Some(position)) = (state.map.as_mut(), state.position) else {
                return DispatchResult::unchanged();
            };
            if !map.set_center(position) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed().with_opt(fetch_venues(state, true))
        }

        Action::MapBackgroundClick => {
            let closed = state.map.as_mut().is_some_and(|m| m.close_popup());
            DispatchResult::changed_if(closed)
        }

        Action::MapSelectStep(step) => {
            let moved = state.map.as_mut().is_some_and(|m| m.select_step(step));
            DispatchResult::changed_if(moved)
        }

        Action::MapOpenPopup(id) => {
            let Some(map) = state.map.as_mut() else {
                return DispatchResult::unchanged();
            };
            let was_open = map.open_popup_id() == Some(id.as_str());
            map.open_popup(&id);
            let selected = map.select(&id);
            let opened = !was_open && map.open_popup_id() == Some(id.as_str());
            DispatchResult::changed_if(opened || selected)
        }

        // ===== Venues =====
        Action::VenuesDidLoad { seq, venues } => {
            if seq != state.seq.venues {
                tracing::debug!(seq, latest = state.seq.venues, "dropping stale venues");
                return DispatchResult::unchanged();
            }
            let cleared = clear_notice(state, Provider::Venues);
            let (Some(map), Some(venues)) = (state.map.as_mut(), venues) else {
                return DispatchResult::changed_if(cleared);
            };
            let added = map.add_markers(venues);
            DispatchResult::changed_if(cleared || added > 0 || !map.markers().is_empty())
        }

        Action::VenuesDidFail { seq, error } => {
            if seq != state.seq.venues {
                return DispatchResult::unchanged();
            }
            state.notice = Some(Notice::new(Provider::Venues, error));
            DispatchResult::changed()
        }

        // ===== Weather =====
        Action::WeatherFetch => match state.position {
            Some(at) if !state.is_setup() => {
                DispatchResult::unchanged().with_opt(fetch_weather(state, at))
            }
            _ => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad { seq, snapshot } => {
            if seq != state.seq.weather {
                tracing::debug!(seq, latest = state.seq.weather, "dropping stale weather");
                return DispatchResult::unchanged();
            }
            // An incomplete payload leaves the display as it was.
            let Some(snapshot) = snapshot else {
                return DispatchResult::unchanged();
            };
            state.weather = Some(snapshot);
            clear_notice(state, Provider::Weather);
            DispatchResult::changed()
        }

        Action::WeatherDidFail { seq, error } => {
            if seq != state.seq.weather {
                return DispatchResult::unchanged();
            }
            state.notice = Some(Notice::new(Provider::Weather, error));
            DispatchResult::changed()
        }

        // ===== News =====
        Action::NewsFetch => {
            if state.is_setup() {
                return DispatchResult::unchanged();
            }
            DispatchResult::unchanged().with_opt(fetch_news(state))
        }

        Action::NewsDidLoad { seq, articles } => {
            if seq != state.seq.news {
                tracing::debug!(seq, latest = state.seq.news, "dropping stale news");
                return DispatchResult::unchanged();
            }
            let Some(articles) = articles else {
                return DispatchResult::unchanged();
            };
            state.news = articles;
            state.news_scroll = 0;
            clear_notice(state, Provider::News);
            DispatchResult::changed()
        }

        Action::NewsDidFail { seq, error } => {
            if seq != state.seq.news {
                return DispatchResult::unchanged();
            }
            state.notice = Some(Notice::new(Provider::News, error));
            DispatchResult::changed()
        }

        Action::NewsScroll(step) => {
            let last = state.news.len().saturating_sub(1);
            let next = state.news_scroll.saturating_add_signed(step).min(last);
            let changed = next != state.news_scroll;
            state.news_scroll = next;
            DispatchResult::changed_if(changed)
        }

        // ===== UI =====
        Action::UiCycleUnits => {
            state.unit = state.unit.cycle();
            DispatchResult::changed()
        }

        Action::UiDismissNotice => DispatchResult::changed_if(state.notice.take().is_some()),

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::RefreshAll => {
            if state.is_setup() {
                return DispatchResult::unchanged();
            }
            let mut result = DispatchResult::unchanged().with_opt(fetch_news(state));
            if let Some(at) = state.position {
                result = result.with_opt(fetch_weather(state, at));
            }
            result.with_opt(fetch_venues(state, false))
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn fetch_weather(state: &mut DashboardState, at: Coordinate) -> Option<Effect> {
    if !state.credentials.has_weather() {
        return None;
    }
    state.seq.weather += 1;
    Some(Effect::FetchWeather {
        seq: state.seq.weather,
        at,
        credentials: state.credentials.clone(),
    })
}

fn fetch_news(state: &mut DashboardState) -> Option<Effect> {
    if !state.credentials.has_news() {
        return None;
    }
    state.seq.news += 1;
    Some(Effect::FetchNews {
        seq: state.seq.news,
        credentials: state.credentials.clone(),
    })
}

/// Venue fetch for the current map center; `debounced` waits for the map to
/// settle first.
fn fetch_venues(state: &mut DashboardState, debounced: bool) -> Option<Effect> {
    let center = state.map.as_ref()?.center();
    if !state.credentials.has_places() {
        return None;
    }
    state.seq.venues += 1;
    let seq = state.seq.venues;
    let credentials = state.credentials.clone();
    Some(if debounced {
        Effect::ScheduleVenueRefresh {
            seq,
            center,
            credentials,
        }
    } else {
        Effect::FetchVenues {
            seq,
            center,
            credentials,
        }
    })
}

fn clear_notice(state: &mut DashboardState, provider: Provider) -> bool {
    if state.notice.as_ref().is_some_and(|n| n.provider == provider) {
        state.notice = None;
        return true;
    }
    false
}
