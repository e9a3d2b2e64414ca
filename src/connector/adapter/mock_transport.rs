use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::{HttpRequest, HttpResponse, HttpTransport};
use crate::domain::{GeocodeError, TransportErrorKind};

type Route = (String, Result<HttpResponse, GeocodeError>);

/// In-memory [`HttpTransport`] returning canned responses.
///
/// Routed responses are matched by a substring of the request URL or body and
/// can be served any number of times; queued responses are served once each,
/// in order, when no route matches. Every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    queue: Mutex<VecDeque<Result<HttpResponse, GeocodeError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` with HTTP 200 whenever `needle` occurs in the URL or body.
    pub fn route(self, needle: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.route_response(needle, Ok(HttpResponse::new(200, body)))
    }

    pub fn route_response(
        self,
        needle: impl Into<String>,
        response: Result<HttpResponse, GeocodeError>,
    ) -> Self {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((needle.into(), response));
        self
    }

    pub fn enqueue(self, response: Result<HttpResponse, GeocodeError>) -> Self {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    pub fn enqueue_json(self, body: impl Into<Vec<u8>>) -> Self {
        self.enqueue(Ok(HttpResponse::new(200, body)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn matches(needle: &str, request: &HttpRequest) -> bool {
        let url = request.url.as_str();
        let decoded = url::form_urlencoded::parse(request.url.query().unwrap_or("").as_bytes())
            .any(|(_, v)| v.contains(needle));
        url.contains(needle)
            || decoded
            || request.body.as_deref().is_some_and(|b| b.contains(needle))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GeocodeError> {
        debug!("MockTransport: {} {}", request.verb, request.redacted_url());

        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let routed = self
            .routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|(needle, _)| Self::matches(needle, &request))
            .map(|(_, response)| response.clone());
        if let Some(response) = routed {
            return response;
        }

        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(GeocodeError::transport(
                    TransportErrorKind::Connect,
                    format!("no canned response for {}", request.redacted_url()),
                ))
            })
    }
}
