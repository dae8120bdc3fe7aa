//! Effects declared by the reducer
//!
//! Effects describe work for the runtime; the reducer never performs I/O.
//! Every fetch carries the credentials it needs and the sequence number its
//! result must echo back.

use geodash_core::{Coordinate, Credentials};

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Resolve the device position once
    Locate,
    FetchWeather {
        seq: u64,
        at: Coordinate,
        credentials: Credentials,
    },
    FetchNews {
        seq: u64,
        credentials: Credentials,
    },
    /// Fetch venues around `center` right away
    FetchVenues {
        seq: u64,
        center: Coordinate,
        credentials: Credentials,
    },
    /// Fetch venues once the map has been still for the debounce window
    ScheduleVenueRefresh {
        seq: u64,
        center: Coordinate,
        credentials: Credentials,
    },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Locate => "Locate",
            Effect::FetchWeather { .. } => "FetchWeather",
            Effect::FetchNews { .. } => "FetchNews",
            Effect::FetchVenues { .. } => "FetchVenues",
            Effect::ScheduleVenueRefresh { .. } => "ScheduleVenueRefresh",
        }
    }
}

/// Result of dispatching an action: whether state changed, plus effects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchResult {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    #[inline]
    pub fn unchanged() -> Self {
        Self::default()
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed when `changed` is true; no effects.
    #[inline]
    pub fn changed_if(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn effects(effects: Vec<Effect>) -> Self {
        Self {
            changed: false,
            effects,
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add an effect when present.
    #[inline]
    pub fn with_opt(mut self, effect: Option<Effect>) -> Self {
        self.effects.extend(effect);
        self
    }

    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}
