use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::request::GoogleRequest;
use super::response::{GoogleResponse, PROVIDER};
use crate::application::{AsyncGeocoder, HttpTransport};
use crate::domain::{ApiKey, Bounds, GeocodeError, GeocodeQuery, GeocodeResult, Location, RequestOptions};

pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Google Maps Geocoding API.
///
/// Google has no batch endpoint; wrap it in
/// [`SynthesizedBatch`](crate::application::SynthesizedBatch) for batch calls.
#[derive(Clone)]
pub struct GoogleGeocoder {
    key: ApiKey,
    transport: Arc<dyn HttpTransport>,
    options: RequestOptions,
    bounds: Option<Bounds>,
}

impl GoogleGeocoder {
    pub fn new(key: &str, transport: Arc<dyn HttpTransport>) -> Result<Self, GeocodeError> {
        Ok(Self::with_key(ApiKey::new(key)?, transport))
    }

    pub fn with_key(key: ApiKey, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            key,
            transport,
            options: RequestOptions::default(),
            bounds: None,
        }
    }

    pub fn from_env(transport: Arc<dyn HttpTransport>) -> Result<Self, GeocodeError> {
        Ok(Self::with_key(ApiKey::from_env(GOOGLE_API_KEY_ENV)?, transport))
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Biases forward results toward `bounds`.
    pub fn with_bounding_box(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn request(&self, query: GeocodeQuery) -> GoogleRequest {
        GoogleRequest::new(self.key.clone(), query)
            .with_options(self.options.clone())
            .with_bounds(self.bounds)
    }

    async fn send(&self, query: GeocodeQuery) -> Result<GeocodeResult, GeocodeError> {
        let request = self.request(query);
        let http_request = request.to_http_request()?;
        debug!("Google request: {}", http_request.redacted_url());

        let response = self.transport.send(http_request).await?;
        let result = GoogleResponse::from_http(&response)?
            .into_result(request.query().clone(), &self.options)?;

        debug!("Google mapped {} addresses for {}", result.len(), result.query());
        Ok(result)
    }
}

#[async_trait]
impl AsyncGeocoder for GoogleGeocoder {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        if address.trim().is_empty() {
            return Err(GeocodeError::invalid_input("address must not be blank"));
        }
        self.send(GeocodeQuery::address(address)).await
    }

    async fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError> {
        self.send(GeocodeQuery::reverse(*location)).await
    }
}
