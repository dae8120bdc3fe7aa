//! Effect handling
//!
//! [`Services`] owns the provider clients and the geolocator and turns each
//! [`Effect`] into a keyed task. Network failures are logged here and come
//! back as `*DidFail` actions; malformed payloads come back as empty results.

use std::time::Duration;

use geodash_core::{
    resolve_location, ApiError, Coordinate, Credentials, Endpoints, Geolocator, NewsClient,
    Transport, VenueClient, WeatherClient,
};

use crate::action::Action;
use crate::effect::Effect;
use crate::tasks::{TaskKey, TaskManager};

/// Quiet period after the last map move before venues are refreshed.
pub const VENUE_REFRESH_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct Services<T, G> {
    venues: VenueClient<T>,
    weather: WeatherClient<T>,
    news: NewsClient<T>,
    geolocator: G,
    venue_debounce: Duration,
}

impl<T: Transport, G: Geolocator> Services<T, G> {
    pub fn new(transport: T, endpoints: Endpoints, geolocator: G) -> Self {
        Self {
            venues: VenueClient::new(transport.clone(), endpoints.clone()),
            weather: WeatherClient::new(transport.clone(), endpoints.clone()),
            news: NewsClient::new(transport, endpoints),
            geolocator,
            venue_debounce: VENUE_REFRESH_DEBOUNCE,
        }
    }

    pub fn with_venue_debounce(mut self, debounce: Duration) -> Self {
        self.venue_debounce = debounce;
        self
    }

    pub fn handle_effect(&self, effect: Effect, tasks: &mut TaskManager) {
        tracing::trace!(effect = effect.name(), "handling effect");
        match effect {
            Effect::Locate => {
                let geolocator = self.geolocator.clone();
                tasks.spawn(TaskKey::Locate, async move {
                    Action::LocateDidResolve(resolve_location(&geolocator).await)
                });
            }

            Effect::FetchWeather {
                seq,
                at,
                credentials,
            } => {
                let client = self.weather.clone();
                tasks.spawn(TaskKey::Weather, async move {
                    match client.current(&credentials, at).await {
                        Ok(snapshot) => Action::WeatherDidLoad { seq, snapshot },
                        Err(ApiError::Decode(e)) => {
                            tracing::debug!(error = %e, "ignoring malformed weather payload");
                            Action::WeatherDidLoad {
                                seq,
                                snapshot: None,
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "weather request failed");
                            Action::WeatherDidFail {
                                seq,
                                error: e.to_string(),
                            }
                        }
                    }
                });
            }

            Effect::FetchNews { seq, credentials } => {
                let client = self.news.clone();
                tasks.spawn(TaskKey::News, async move {
                    match client.search(&credentials).await {
                        Ok(articles) => Action::NewsDidLoad { seq, articles },
                        Err(ApiError::Decode(e)) => {
                            tracing::debug!(error = %e, "ignoring malformed news payload");
                            Action::NewsDidLoad {
                                seq,
                                articles: None,
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "news request failed");
                            Action::NewsDidFail {
                                seq,
                                error: e.to_string(),
                            }
                        }
                    }
                });
            }

            Effect::FetchVenues {
                seq,
                center,
                credentials,
            } => {
                let client = self.venues.clone();
                tasks.spawn(TaskKey::Venues, async move {
                    explore(client, seq, center, credentials).await
                });
            }

            Effect::ScheduleVenueRefresh {
                seq,
                center,
                credentials,
            } => {
                let client = self.venues.clone();
                tasks.debounce(TaskKey::Venues, self.venue_debounce, async move {
                    explore(client, seq, center, credentials).await
                });
            }
        }
    }
}

async fn explore<T: Transport>(
    client: VenueClient<T>,
    seq: u64,
    center: Coordinate,
    credentials: Credentials,
) -> Action {
    match client.explore(&credentials, center).await {
        Ok(venues) => Action::VenuesDidLoad { seq, venues },
        Err(ApiError::Decode(e)) => {
            tracing::debug!(error = %e, "ignoring malformed venue payload");
            Action::VenuesDidLoad { seq, venues: None }
        }
        Err(e) => {
            tracing::warn!(error = %e, %center, "venue request failed");
            Action::VenuesDidFail {
                seq,
                error: e.to_string(),
            }
        }
    }
}
