use async_trait::async_trait;
use url::Url;

use crate::domain::{GeocodeError, RequestVerb};

/// A fully materialized outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub verb: RequestVerb,
    pub url: Url,
    pub body: Option<String>,
    pub content_type: Option<&'static str>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            verb: RequestVerb::get(),
            url,
            body: None,
            content_type: None,
        }
    }

    pub fn with_body(mut self, body: String, content_type: &'static str) -> Self {
        self.body = Some(body);
        self.content_type = Some(content_type);
        self
    }

    /// The URL with every `key` query value masked, for logging.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                let value = if k == "key" { "***".to_string() } else { v.into_owned() };
                (k.into_owned(), value)
            })
            .collect();
        if pairs.is_empty() {
            return url.to_string();
        }
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a request and hands back the raw response.
///
/// Implementations report connection, timeout and TLS failures as
/// [`GeocodeError::TransportError`] and never retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GeocodeError>;
}
