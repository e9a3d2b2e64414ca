use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use tracing::debug;

use crate::application::{HttpRequest, HttpResponse, HttpTransport};
use crate::domain::{GeocodeError, TransportErrorKind};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("geocoding/", env!("CARGO_PKG_VERSION"), " (Rust)");

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
///
/// Performs exactly one HTTP exchange per call; failures are reported as
/// [`GeocodeError::TransportError`] and never retried.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| {
                GeocodeError::invalid_configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn map_error(e: reqwest::Error) -> GeocodeError {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if e.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        GeocodeError::transport(kind, e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GeocodeError> {
        let method = Method::from_bytes(request.verb.as_str().as_bytes()).map_err(|e| {
            GeocodeError::invalid_configuration(format!(
                "unsupported request verb {}: {}",
                request.verb, e
            ))
        })?;

        debug!("{} {}", request.verb, request.redacted_url());

        let mut builder = self
            .client
            .request(method, request.url)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(body) = request.body {
            if let Some(content_type) = request.content_type {
                builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Self::map_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::map_error)?;

        debug!("Received HTTP {} ({} bytes)", status, body.len());

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
