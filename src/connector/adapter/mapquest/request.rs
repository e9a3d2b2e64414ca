use serde::Serialize;
use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::application::HttpRequest;
use crate::domain::{ApiKey, Bounds, DataFormat, GeocodeError, Location, RequestOptions, RequestVerb};

pub const COMMERCIAL_BASE_URL: &str = "https://www.mapquestapi.com/geocoding/v1/";
pub const OPEN_DATA_BASE_URL: &str = "https://open.mapquestapi.com/geocoding/v1/";

const JSON_CONTENT_TYPE: &str = "application/json";

/// The operation a MapQuest request performs.
///
/// Supplies the path segment appended to the base URL and the fields that sit
/// next to `options` in the request document.
pub trait MapQuestAction: Serialize + Send + Sync {
    fn action(&self) -> &'static str;

    fn default_verb(&self) -> RequestVerb {
        RequestVerb::post()
    }
}

/// Forward geocoding of one free-text location.
#[derive(Debug, Clone, Serialize)]
pub struct AddressAction {
    location: String,
}

impl AddressAction {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl MapQuestAction for AddressAction {
    fn action(&self) -> &'static str {
        "address"
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReverseLocation {
    lat_lng: LatLng,
}

/// Reverse geocoding of one coordinate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReverseAction {
    location: ReverseLocation,
}

impl ReverseAction {
    pub fn new(location: Location) -> Self {
        Self {
            location: ReverseLocation {
                lat_lng: LatLng {
                    lat: location.latitude(),
                    lng: location.longitude(),
                },
            },
        }
    }
}

impl MapQuestAction for ReverseAction {
    fn action(&self) -> &'static str {
        "reverse"
    }
}

/// Forward geocoding of several locations in one call.
#[derive(Debug, Clone, Serialize)]
pub struct BatchAction {
    locations: Vec<String>,
}

impl BatchAction {
    /// Most locations MapQuest accepts in a single batch call.
    pub const MAX_LOCATIONS: usize = 100;

    pub fn new(locations: Vec<String>) -> Self {
        Self { locations }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl MapQuestAction for BatchAction {
    fn action(&self) -> &'static str {
        "batch"
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireOptions {
    max_results: i64,
    thumb_maps: bool,
    ignore_lat_lng_input: bool,
}

impl From<&RequestOptions> for WireOptions {
    fn from(options: &RequestOptions) -> Self {
        Self {
            // -1 tells MapQuest to use its own limit
            max_results: options.max_results().map_or(-1, i64::from),
            thumb_maps: options.thumb_maps(),
            ignore_lat_lng_input: options.ignore_lat_lng_input(),
        }
    }
}

#[derive(Serialize)]
struct RequestDocument<'a, A: Serialize> {
    options: WireOptions,
    #[serde(flatten)]
    action: &'a A,
}

/// A MapQuest geocoding request.
///
/// Holds everything needed to produce the URI and body; both are computed on
/// demand and can be recomputed any number of times with identical output.
#[derive(Debug, Clone)]
pub struct MapQuestRequest<A> {
    key: ApiKey,
    action: A,
    options: RequestOptions,
    bounding_box: Option<Bounds>,
    input_format: DataFormat,
    output_format: DataFormat,
    verb: RequestVerb,
    use_open_data: bool,
}

impl<A: MapQuestAction> MapQuestRequest<A> {
    /// Fails with `InvalidConfiguration` when `key` is blank.
    pub fn new(key: &str, action: A) -> Result<Self, GeocodeError> {
        Ok(Self::with_key(ApiKey::new(key)?, action))
    }

    pub fn with_key(key: ApiKey, action: A) -> Self {
        let verb = action.default_verb();
        Self {
            key,
            action,
            options: RequestOptions::default(),
            bounding_box: None,
            input_format: DataFormat::default(),
            output_format: DataFormat::default(),
            verb,
            use_open_data: false,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_bounding_box(mut self, bounding_box: Option<Bounds>) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Request documents are always serialized as JSON, so any other input
    /// format fails with `InvalidConfiguration`.
    pub fn with_input_format(mut self, format: DataFormat) -> Result<Self, GeocodeError> {
        if format != DataFormat::Json {
            return Err(GeocodeError::invalid_configuration(format!(
                "request documents are JSON; input format {} is not supported",
                format
            )));
        }
        self.input_format = format;
        Ok(self)
    }

    pub fn with_output_format(mut self, format: DataFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Blank resets to `POST`; anything else is trimmed and upper-cased.
    pub fn with_verb(mut self, verb: &str) -> Self {
        self.verb = RequestVerb::new(verb);
        self
    }

    pub fn with_open_data(mut self, use_open_data: bool) -> Self {
        self.use_open_data = use_open_data;
        self
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn bounding_box(&self) -> Option<&Bounds> {
        self.bounding_box.as_ref()
    }

    pub fn input_format(&self) -> DataFormat {
        self.input_format
    }

    pub fn output_format(&self) -> DataFormat {
        self.output_format
    }

    pub fn verb(&self) -> &RequestVerb {
        &self.verb
    }

    pub fn base_url(&self) -> &'static str {
        if self.use_open_data {
            OPEN_DATA_BASE_URL
        } else {
            COMMERCIAL_BASE_URL
        }
    }

    /// The request document: `options` followed by the action's fields.
    pub fn document(&self) -> Result<String, GeocodeError> {
        let document = RequestDocument {
            options: WireOptions::from(&self.options),
            action: &self.action,
        };
        serde_json::to_string(&document).map_err(|e| {
            GeocodeError::invalid_configuration(format!("failed to serialize request: {}", e))
        })
    }

    /// The body sent with payload-carrying verbs; `None` for `GET`.
    pub fn body(&self) -> Result<Option<String>, GeocodeError> {
        if self.verb.carries_payload() {
            self.document().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn uri(&self) -> Result<Url, GeocodeError> {
        let mut uri = String::from(self.base_url());
        uri.push_str(self.action.action());
        uri.push('?');

        // The key and the bounding box token are already URL-safe and must
        // reach MapQuest byte for byte.
        uri.push_str(&format!("key={}&", self.key.expose()));

        if let Some(ref bounds) = self.bounding_box {
            uri.push_str(&format!("boundingBox={}&", bounds.to_token()));
        }

        // inFormat is always the default (json) and is never sent.
        if !self.output_format.is_default() {
            uri.push_str(&format!("outFormat={}&", self.output_format));
        }

        if !self.verb.carries_payload() {
            let document: String = byte_serialize(self.document()?.as_bytes()).collect();
            uri.push_str(&format!("json={}&", document));
        }

        uri.pop();

        Url::parse(&uri).map_err(|e| {
            GeocodeError::invalid_configuration(format!("invalid request URI: {}", e))
        })
    }

    pub fn to_http_request(&self) -> Result<HttpRequest, GeocodeError> {
        let request = HttpRequest {
            verb: self.verb.clone(),
            url: self.uri()?,
            body: None,
            content_type: None,
        };
        match self.body()? {
            Some(body) => Ok(request.with_body(body, JSON_CONTENT_TYPE)),
            None => Ok(request),
        }
    }
}

impl<A: MapQuestAction> std::fmt::Display for MapQuestRequest<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let document = self.document().map_err(|_| std::fmt::Error)?;
        f.write_str(&document)
    }
}
