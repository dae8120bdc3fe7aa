//! End-to-end flows through the runtime with a recording transport
//!
//! Time is paused, so debounce windows elapse only when the test advances
//! the clock or every task is idle.

use std::time::Duration;

use geodash::action::Action;
use geodash::state::Page;
use geodash::{DashboardState, Runtime, Services};
use geodash_core::location::DENIED_BANNER;
use geodash_core::testing::RecordingTransport;
use geodash_core::{
    ApiError, Coordinate, Credentials, Endpoints, FixedGeolocator, Geolocator, NewsArticle,
    PanDirection, Transport, DEFAULT_CENTER, DEFAULT_ZOOM, VENUE_ZOOM,
};
use serde_json::{json, Value};

const LONDON: Coordinate = Coordinate::new(51.5074, -0.1278);

fn creds() -> Credentials {
    Credentials {
        places_client_id: "cid".into(),
        places_client_secret: "csecret".into(),
        weather_key: "wkey".into(),
        news_key: "nkey".into(),
    }
}

fn explore_payload() -> Value {
    json!({
        "response": {
            "groups": [{
                "items": [{
                    "venue": {
                        "id": "v1",
                        "name": "Graze",
                        "location": { "lat": 51.5080, "lng": -0.1281 }
                    },
                    "tips": [
                        { "text": "Brunch is great", "user": { "firstName": "Sam" } }
                    ]
                }]
            }]
        }
    })
}

fn runtime_with(
    transport: RecordingTransport,
    geolocator: FixedGeolocator,
    credentials: Credentials,
) -> Runtime<RecordingTransport, FixedGeolocator> {
    let services = Services::new(transport, Endpoints::default(), geolocator);
    Runtime::new(DashboardState::new(credentials), services)
}

/// Dispatch queued actions until nothing arrives for a while.
async fn settle<T: Transport, G: Geolocator>(runtime: &mut Runtime<T, G>) {
    loop {
        match tokio::time::timeout(Duration::from_secs(5), runtime.next_action()).await {
            Ok(Some(action)) => {
                runtime.dispatch(action);
            }
            _ => break,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_startup_locates_then_fetches_everything() {
    let transport = RecordingTransport::replying(json!({}));
    let mut runtime = runtime_with(transport.clone(), FixedGeolocator::at(LONDON), creds());

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;

    let state = runtime.state();
    assert_eq!(state.page, Page::Main);
    assert_eq!(state.position, Some(LONDON));
    assert!(state.banner.is_none());
    let map = state.map.as_ref().expect("map created");
    assert_eq!(map.center(), LONDON);
    assert_eq!(map.zoom(), VENUE_ZOOM);

    assert_eq!(transport.requests_to("venues/explore").len(), 1);
    assert_eq!(transport.requests_to("weather").len(), 1);
    assert_eq!(transport.requests_to("news/search").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_pans_issue_one_venue_request() {
    let transport = RecordingTransport::replying(json!({}));
    let mut runtime = runtime_with(transport.clone(), FixedGeolocator::at(LONDON), creds());

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;
    assert_eq!(transport.requests_to("venues/explore").len(), 1);

    for _ in 0..5 {
        runtime.dispatch(Action::MapPan(PanDirection::East));
        tokio::time::advance(Duration::from_millis(100)).await;
    }
    // Still inside the quiet window of the last pan
    assert_eq!(transport.requests_to("venues/explore").len(), 1);

    settle(&mut runtime).await;

    let venue_requests = transport.requests_to("venues/explore");
    assert_eq!(venue_requests.len(), 2);
    let final_center = runtime.state().map.as_ref().unwrap().center();
    assert_ne!(final_center, LONDON);
    assert_eq!(
        venue_requests[1].query_value("ll"),
        Some(final_center.to_ll().as_str())
    );
}

#[tokio::test(start_paused = true)]
async fn test_moves_spaced_apart_each_refresh() {
    let transport = RecordingTransport::replying(json!({}));
    let mut runtime = runtime_with(transport.clone(), FixedGeolocator::at(LONDON), creds());

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;

    runtime.dispatch(Action::MapPan(PanDirection::North));
    settle(&mut runtime).await;
    runtime.dispatch(Action::MapZoom(-1));
    settle(&mut runtime).await;

    assert_eq!(transport.requests_to("venues/explore").len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_empty_credentials_make_no_requests() {
    let transport = RecordingTransport::replying(json!({}));
    let mut runtime = runtime_with(
        transport.clone(),
        FixedGeolocator::at(LONDON),
        Credentials::default(),
    );

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;
    runtime.dispatch(Action::MapPan(PanDirection::West));
    runtime.dispatch(Action::RefreshAll);
    settle(&mut runtime).await;

    assert_eq!(transport.request_count(), 0);
    // The map still works without keys
    assert!(runtime.state().map.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_location_failure_falls_back_to_default_center() {
    let transport = RecordingTransport::replying(json!({}));
    let mut runtime = runtime_with(
        transport.clone(),
        FixedGeolocator::failing("permission denied"),
        creds(),
    );

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;

    let state = runtime.state();
    assert_eq!(state.position, Some(DEFAULT_CENTER));
    assert_eq!(state.banner.as_deref(), Some(DENIED_BANNER));
    let map = state.map.as_ref().unwrap();
    assert_eq!(map.center(), DEFAULT_CENTER);
    assert_eq!(map.zoom(), DEFAULT_ZOOM);

    // Fetches still go out for the default center
    let venue_requests = transport.requests_to("venues/explore");
    assert_eq!(venue_requests.len(), 1);
    assert_eq!(
        venue_requests[0].query_value("ll"),
        Some(DEFAULT_CENTER.to_ll().as_str())
    );
}

#[tokio::test(start_paused = true)]
async fn test_venues_become_markers_with_popup() {
    let transport = RecordingTransport::replying(json!({}))
        .route("venues/explore", Ok(explore_payload()));
    let mut runtime = runtime_with(transport, FixedGeolocator::at(LONDON), creds());

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;

    let map = runtime.state().map.as_ref().unwrap();
    assert_eq!(map.markers().len(), 1);

    runtime.dispatch(Action::MapOpenPopup("v1".into()));
    assert!(runtime.state().popup_open());
    let venue = runtime
        .state()
        .map
        .as_ref()
        .and_then(|m| m.open_popup_venue())
        .unwrap();
    let popup = venue.popup();
    assert_eq!(popup.title, "Graze");
    assert_eq!(popup.tips[0].author.as_deref(), Some("Sam"));

    runtime.dispatch(Action::MapBackgroundClick);
    assert!(!runtime.state().popup_open());

    // A refresh of the same area keeps one marker per venue
    runtime.dispatch(Action::RefreshAll);
    settle(&mut runtime).await;
    assert_eq!(runtime.state().map.as_ref().unwrap().markers().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_sets_notice_without_blocking_others() {
    let transport = RecordingTransport::replying(json!({}))
        .route("weather", Err(ApiError::Status(401)))
        .route("venues/explore", Ok(explore_payload()));
    let mut runtime = runtime_with(transport, FixedGeolocator::at(LONDON), creds());

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;

    let state = runtime.state();
    let notice = state.notice.as_ref().expect("weather notice");
    assert_eq!(
        notice.to_string(),
        "weather unavailable: unexpected HTTP status 401"
    );
    assert!(state.weather.is_none());
    assert_eq!(state.map.as_ref().unwrap().markers().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_news_error_envelope_keeps_current_list() {
    let transport = RecordingTransport::replying(json!({}))
        .route("news/search", Ok(json!({ "_type": "ErrorResponse" })));
    let services = Services::new(
        transport.clone(),
        Endpoints::default(),
        FixedGeolocator::at(LONDON),
    );
    let mut state = DashboardState::new(creds());
    state.news = vec![NewsArticle {
        headline: "Tower Bridge lifts".into(),
        url: "https://news.test/bridge".into(),
        description: "Traffic held".into(),
        thumbnail: None,
    }];
    let mut runtime = Runtime::new(state, services);

    runtime.dispatch(Action::SetupSubmit);
    settle(&mut runtime).await;

    assert_eq!(transport.requests_to("news/search").len(), 1);
    let state = runtime.state();
    assert_eq!(state.news.len(), 1);
    assert_eq!(state.news[0].headline, "Tower Bridge lifts");
    assert!(state.notice.is_none());
}
