//! Test doubles for the provider seams
//!
//! - [`RecordingTransport`]: records every request and answers from canned
//!   responses, so tests can assert exactly what would have been sent.
//! - [`FixedGeolocator`](crate::location::FixedGeolocator) doubles as the
//!   geolocation stub.
//!
//! # Example
//!
//! ```ignore
//! let transport = RecordingTransport::replying(json!({ "main": { .. } }))
//!     .route("/bing/", Err(ApiError::Status(401)));
//! let client = WeatherClient::new(transport.clone(), Endpoints::default());
//! client.current(&creds, center).await?;
//! assert_eq!(transport.request_count(), 1);
//! ```

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::transport::{ApiError, HttpRequest, Transport};

type Reply = Result<Value, ApiError>;

#[derive(Default)]
struct Inner {
    requests: Vec<HttpRequest>,
    routes: Vec<(String, Reply)>,
    fallback: Option<Reply>,
}

/// A [`Transport`] that never touches the network.
///
/// Replies are chosen by the first route whose fragment occurs in the request
/// URL, then the fallback reply. With neither, the request fails with
/// `ApiError::Request`.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `payload`.
    pub fn replying(payload: Value) -> Self {
        let transport = Self::new();
        transport.lock().fallback = Some(Ok(payload));
        transport
    }

    /// Fail every request with `error`.
    pub fn failing(error: ApiError) -> Self {
        let transport = Self::new();
        transport.lock().fallback = Some(Err(error));
        transport
    }

    /// Answer requests whose URL contains `fragment` with `reply`.
    pub fn route(self, fragment: impl Into<String>, reply: Reply) -> Self {
        self.lock().routes.push((fragment.into(), reply));
        self
    }

    /// All requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Requests whose URL contains `fragment`.
    pub fn requests_to(&self, fragment: &str) -> Vec<HttpRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply_for(&self, request: HttpRequest) -> Reply {
        let mut inner = self.lock();
        let reply = inner
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| inner.fallback.clone())
            .unwrap_or_else(|| Err(ApiError::Request(format!("no route for {}", request.url))));
        inner.requests.push(request);
        reply
    }
}

impl Transport for RecordingTransport {
    async fn get_json(&self, request: HttpRequest) -> Result<Value, ApiError> {
        self.reply_for(request)
    }
}
