use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::application::HttpRequest;
use crate::domain::{ApiKey, Bounds, GeocodeError, GeocodeQuery, RequestOptions};

pub const GOOGLE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// A Google Geocoding API request. Always sent as `GET`.
#[derive(Debug, Clone)]
pub struct GoogleRequest {
    key: ApiKey,
    query: GeocodeQuery,
    options: RequestOptions,
    bounds: Option<Bounds>,
}

impl GoogleRequest {
    pub fn new(key: ApiKey, query: GeocodeQuery) -> Self {
        Self {
            key,
            query,
            options: RequestOptions::default(),
            bounds: None,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn query(&self) -> &GeocodeQuery {
        &self.query
    }

    pub fn uri(&self) -> Result<Url, GeocodeError> {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(6);

        match self.query {
            GeocodeQuery::Address(ref text) => params.push(("address", text.clone())),
            GeocodeQuery::Reverse(location) => params.push(("latlng", location.to_string())),
        }

        params.push(("key", self.key.expose().to_string()));

        if let Some(ref bounds) = self.bounds {
            params.push(("bounds", format!("{}|{}", bounds.south_west(), bounds.north_east())));
        }
        if let Some(locale) = self.options.locale() {
            params.push(("language", locale.to_string()));
        }
        if let Some(region) = self.options.region() {
            params.push(("region", region.to_string()));
        }
        if matches!(self.query, GeocodeQuery::Reverse(_)) && !self.options.result_types().is_empty() {
            params.push(("result_type", self.options.result_types().join("|")));
        }

        let query = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        Url::parse(&format!("{}?{}", GOOGLE_BASE_URL, query)).map_err(|e| {
            GeocodeError::invalid_configuration(format!("invalid request URI: {}", e))
        })
    }

    pub fn to_http_request(&self) -> Result<HttpRequest, GeocodeError> {
        Ok(HttpRequest::get(self.uri()?))
    }
}
