//! Venue explore client and popup content
//!
//! One GET per refresh returns recommended venues around a coordinate,
//! each with a handful of user tips. Venues become map markers; tips fill the
//! marker's popup.

use serde::Deserialize;
use serde_json::Value;

use crate::config::{Endpoints, VENUES_API_VERSION};
use crate::coord::Coordinate;
use crate::credentials::Credentials;
use crate::html;
use crate::transport::{ApiError, HttpRequest, Transport};

/// Tips rendered per popup; extra tips are dropped.
pub const MAX_POPUP_TIPS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct Tip {
    pub text: String,
    /// First name of the tip's author, when the provider includes one.
    pub author: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub tips: Vec<Tip>,
}

impl Venue {
    pub fn popup(&self) -> PopupContent {
        PopupContent::for_venue(self)
    }
}

/// Content of a marker popup: the venue name and at most four tips.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub tips: Vec<Tip>,
}

impl PopupContent {
    pub fn for_venue(venue: &Venue) -> Self {
        Self {
            title: venue.name.clone(),
            tips: venue.tips.iter().take(MAX_POPUP_TIPS).cloned().collect(),
        }
    }

    /// Info-window markup: a title div followed by one paragraph per tip.
    pub fn to_html(&self) -> String {
        let mut out = format!("<div class='info-title'>{}</div>", html::escape(&self.title));
        for tip in &self.tips {
            out.push_str("<p>");
            out.push_str(&html::escape(&tip.text));
            if let Some(author) = &tip.author {
                out.push_str("<br/>- ");
                out.push_str(&html::escape(author));
            }
            out.push_str("</p>");
        }
        out
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ExploreEnvelope {
    response: Option<ExploreResponse>,
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    groups: Vec<ExploreGroup>,
}

#[derive(Debug, Deserialize)]
struct ExploreGroup {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ExploreItem {
    venue: Option<WireVenue>,
    #[serde(default)]
    tips: Vec<WireTip>,
}

#[derive(Debug, Deserialize)]
struct WireVenue {
    #[serde(default)]
    id: String,
    name: String,
    location: WireLocation,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct WireTip {
    #[serde(default)]
    text: String,
    user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    #[serde(rename = "firstName")]
    first_name: Option<String>,
}

/// Extract venues from an explore payload.
///
/// Returns `None` when the envelope or its first group is missing, which the
/// caller treats as "nothing to show" rather than an error. Items without a
/// venue, or whose venue lacks a name or location, are skipped one by one.
pub fn parse_explore(payload: Value) -> Option<Vec<Venue>> {
    let envelope: ExploreEnvelope = match serde_json::from_value(payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(error = %e, "explore payload has unexpected shape");
            return None;
        }
    };

    let group = envelope.response?.groups.into_iter().next()?;

    let venues = group
        .items
        .into_iter()
        .filter_map(|raw| {
            let item: ExploreItem = match serde_json::from_value(raw) {
                Ok(item) => item,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed explore item");
                    return None;
                }
            };
            let venue = item.venue?;
            let id = if venue.id.is_empty() {
                format!("{},{}", venue.location.lat, venue.location.lng)
            } else {
                venue.id
            };
            Some(Venue {
                id,
                name: venue.name,
                coordinate: Coordinate::new(venue.location.lat, venue.location.lng),
                tips: item
                    .tips
                    .into_iter()
                    .map(|tip| Tip {
                        text: tip.text,
                        author: tip.user.and_then(|u| u.first_name),
                    })
                    .collect(),
            })
        })
        .collect();

    Some(venues)
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct VenueClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> VenueClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Build the explore request, or `None` when the places credentials are
    /// incomplete.
    pub fn request(&self, credentials: &Credentials, center: Coordinate) -> Option<HttpRequest> {
        if !credentials.has_places() {
            return None;
        }
        Some(
            HttpRequest::get(self.endpoints.venues_explore())
                .query("client_id", credentials.places_client_id.clone())
                .query("client_secret", credentials.places_client_secret.clone())
                .query("v", VENUES_API_VERSION)
                .query("ll", center.to_ll()),
        )
    }

    /// Fetch venues around `center`.
    ///
    /// `Ok(None)` means nothing was requested (missing credentials) or the
    /// payload held no venue group.
    pub async fn explore(
        &self,
        credentials: &Credentials,
        center: Coordinate,
    ) -> Result<Option<Vec<Venue>>, ApiError> {
        let Some(request) = self.request(credentials, center) else {
            tracing::debug!("places credentials missing, skipping venue refresh");
            return Ok(None);
        };
        let payload = self.transport.get_json(request).await?;
        Ok(parse_explore(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    fn creds() -> Credentials {
        Credentials {
            places_client_id: "cid".into(),
            places_client_secret: "csecret".into(),
            ..Default::default()
        }
    }

    fn sample_payload() -> Value {
        json!({
            "response": {
                "groups": [{
                    "items": [
                        {
                            "venue": {
                                "id": "v1",
                                "name": "Cafe Zoma",
                                "location": { "lat": 43.07, "lng": -89.38 }
                            },
                            "tips": [
                                { "text": "Great latte", "user": { "firstName": "Ann" } },
                                { "text": "Busy on weekends" },
                                { "text": "t3", "user": { "firstName": "C" } },
                                { "text": "t4" },
                                { "text": "t5" }
                            ]
                        },
                        {
                            "venue": {
                                "id": "v2",
                                "name": "State Street",
                                "location": { "lat": 43.075, "lng": -89.39 }
                            }
                        }
                    ]
                }]
            }
        })
    }

    #[test]
    fn test_parse_explore() {
        let venues = parse_explore(sample_payload()).expect("venues");
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "Cafe Zoma");
        assert_eq!(venues[0].coordinate, Coordinate::new(43.07, -89.38));
        assert_eq!(venues[0].tips.len(), 5);
        assert_eq!(venues[0].tips[0].author.as_deref(), Some("Ann"));
        assert_eq!(venues[0].tips[1].author, None);
        assert!(venues[1].tips.is_empty());
    }

    #[test]
    fn test_parse_missing_envelope_or_group() {
        assert_eq!(parse_explore(json!({})), None);
        assert_eq!(parse_explore(json!({ "response": {} })), None);
        assert_eq!(parse_explore(json!({ "response": { "groups": [] } })), None);
        assert_eq!(parse_explore(json!({ "response": { "groups": 7 } })), None);
    }

    #[test]
    fn test_malformed_item_skips_only_that_venue() {
        let venues = parse_explore(json!({
            "response": {
                "groups": [{
                    "items": [
                        { "venue": { "id": "nameless", "location": { "lat": 1.0, "lng": 2.0 } } },
                        { "venue": { "id": "nowhere", "name": "Lost" } },
                        { "venue": { "id": "bad", "name": "Odd", "location": { "lat": "x", "lng": 0 } } },
                        {
                            "venue": {
                                "id": "ok",
                                "name": "Olbrich Gardens",
                                "location": { "lat": 43.09, "lng": -89.33 }
                            }
                        }
                    ]
                }]
            }
        }))
        .expect("group present");

        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].id, "ok");
        assert_eq!(venues[0].name, "Olbrich Gardens");
    }

    #[test]
    fn test_popup_limits_tips() {
        let venue = parse_explore(sample_payload()).unwrap().remove(0);
        let popup = venue.popup();
        assert_eq!(popup.title, "Cafe Zoma");
        assert_eq!(popup.tips.len(), MAX_POPUP_TIPS);
    }

    #[test]
    fn test_popup_html() {
        let popup = PopupContent {
            title: "Bob's".into(),
            tips: vec![
                Tip {
                    text: "Nice".into(),
                    author: Some("Ann".into()),
                },
                Tip {
                    text: "Loud".into(),
                    author: None,
                },
            ],
        };
        assert_eq!(
            popup.to_html(),
            "<div class='info-title'>Bob&#39;s</div><p>Nice<br/>- Ann</p><p>Loud</p>"
        );
    }

    #[tokio::test]
    async fn test_explore_sends_credentials_in_query() {
        let transport = RecordingTransport::replying(sample_payload());
        let client = VenueClient::new(transport.clone(), Endpoints::default());

        let venues = client
            .explore(&creds(), Coordinate::new(43.0, -89.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(venues.len(), 2);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.url, "https://api.foursquare.com/v2/venues/explore");
        assert_eq!(req.query_value("client_id"), Some("cid"));
        assert_eq!(req.query_value("client_secret"), Some("csecret"));
        assert_eq!(req.query_value("v"), Some("20161001"));
        assert_eq!(req.query_value("ll"), Some("43,-89"));
        assert!(req.headers.is_empty());
    }

    #[tokio::test]
    async fn test_explore_without_credentials_sends_nothing() {
        let transport = RecordingTransport::replying(sample_payload());
        let client = VenueClient::new(transport.clone(), Endpoints::default());

        let mut partial = creds();
        partial.places_client_secret.clear();

        let result = client.explore(&partial, Coordinate::default()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_explore_propagates_transport_error() {
        let transport = RecordingTransport::failing(ApiError::Status(500));
        let client = VenueClient::new(transport, Endpoints::default());

        let result = client.explore(&creds(), Coordinate::default()).await;
        assert!(matches!(result, Err(ApiError::Status(500))));
    }
}
