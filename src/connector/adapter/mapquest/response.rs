use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::application::HttpResponse;
use crate::connector::adapter::decode::{classify_http_status, decode_json};
use crate::domain::{
    Address, AddressComponent, AddressComponents, AddressType, GeocodeError, GeocodeQuery,
    GeocodeResult, Location, MapQuestQuality, ProviderErrorKind, RequestOptions,
};

pub const PROVIDER: &str = "mapquest";

#[derive(Debug, Deserialize)]
pub struct MapQuestResponse {
    info: Info,
    #[serde(default)]
    results: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct Info {
    statuscode: i64,
    #[serde(default)]
    messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default)]
    locations: Vec<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLocation {
    #[serde(default)]
    street: String,
    #[serde(default)]
    admin_area6: String,
    #[serde(default)]
    admin_area5: String,
    #[serde(default)]
    admin_area4: String,
    #[serde(default)]
    admin_area3: String,
    #[serde(default)]
    admin_area1: String,
    #[serde(default)]
    postal_code: String,
    #[serde(default)]
    geocode_quality: String,
    #[serde(default)]
    geocode_quality_code: String,
    lat_lng: WireLatLng,
    // Labels for the adminArea fields, already implied by the normalized names.
    #[serde(default, rename = "adminArea6Type")]
    _admin_area6_type: Option<String>,
    #[serde(default, rename = "adminArea5Type")]
    _admin_area5_type: Option<String>,
    #[serde(default, rename = "adminArea4Type")]
    _admin_area4_type: Option<String>,
    #[serde(default, rename = "adminArea3Type")]
    _admin_area3_type: Option<String>,
    #[serde(default, rename = "adminArea1Type")]
    _admin_area1_type: Option<String>,
    // Document order; relies on serde_json's preserve_order.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl WireLocation {
    fn into_address(self) -> Result<Address, GeocodeError> {
        let location = Location::new(self.lat_lng.lat, self.lat_lng.lng).map_err(|e| {
            GeocodeError::malformed_response(format!("MapQuest returned an invalid coordinate: {}", e))
        })?;

        let components = AddressComponents {
            street: non_empty(self.street),
            neighborhood: non_empty(self.admin_area6),
            locality: non_empty(self.admin_area5),
            county: non_empty(self.admin_area4),
            region: non_empty(self.admin_area3),
            postal_code: non_empty(self.postal_code),
            country: non_empty(self.admin_area1),
        };

        let quality = MapQuestQuality::from_code(self.geocode_quality.trim());

        let mut extra = Vec::with_capacity(self.extra.len() + 1);
        if let Some(code) = non_empty(self.geocode_quality_code) {
            extra.push(AddressComponent::new("geocodeQualityCode", code.clone(), code));
        }
        for (kind, value) in &self.extra {
            if value.is_null() {
                continue;
            }
            let text = value_text(value);
            extra.push(AddressComponent::new(kind.clone(), text.clone(), text));
        }

        let formatted = if components.is_empty() {
            location.to_string()
        } else {
            components.compose()
        };

        Ok(Address::new(formatted, location, AddressType::MapQuest(quality.clone()), PROVIDER)
            .with_components(components)
            .with_extra_components(extra)
            .with_precision(quality.precision()))
    }
}

fn status_error(statuscode: i64, messages: &[String]) -> GeocodeError {
    let kind = match statuscode {
        400 => ProviderErrorKind::MalformedRequest,
        401 | 403 => ProviderErrorKind::InvalidCredentials,
        429 => ProviderErrorKind::RateLimited,
        _ => ProviderErrorKind::Unknown,
    };
    let message = if messages.is_empty() {
        format!("MapQuest status {}", statuscode)
    } else {
        format!("MapQuest status {}: {}", statuscode, messages.join("; "))
    };
    GeocodeError::provider(kind, message)
}

impl MapQuestResponse {
    /// Classifies the HTTP exchange, decodes it and checks `info.statuscode`.
    pub fn from_http(response: &HttpResponse) -> Result<Self, GeocodeError> {
        classify_http_status(PROVIDER, response)?;

        let tree = decode_json(PROVIDER, &response.body)?;
        let parsed: MapQuestResponse = serde_json::from_value(tree).map_err(|e| {
            GeocodeError::malformed_response(format!("unexpected MapQuest response shape: {}", e))
        })?;

        if parsed.info.statuscode != 0 {
            let err = status_error(parsed.info.statuscode, &parsed.info.messages);
            warn!("{}", err);
            return Err(err);
        }

        debug!("MapQuest returned {} result groups", parsed.results.len());
        Ok(parsed)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Maps a single-query response. No result group means no matches.
    pub fn into_single(
        self,
        query: GeocodeQuery,
        options: &RequestOptions,
    ) -> Result<GeocodeResult, GeocodeError> {
        match self.results.into_iter().next() {
            Some(entry) => map_entry(entry, query, options),
            None => Ok(GeocodeResult::empty(query)),
        }
    }

    /// Maps a batch response; result groups line up with `queries`.
    pub fn into_batch(
        self,
        queries: Vec<GeocodeQuery>,
        options: &RequestOptions,
    ) -> Result<Vec<Result<GeocodeResult, GeocodeError>>, GeocodeError> {
        if self.results.len() != queries.len() {
            return Err(GeocodeError::malformed_response(format!(
                "MapQuest batch returned {} result groups for {} locations",
                self.results.len(),
                queries.len()
            )));
        }

        Ok(self
            .results
            .into_iter()
            .zip(queries)
            .map(|(entry, query)| map_entry(entry, query, options))
            .collect())
    }
}

fn map_entry(
    entry: ResultEntry,
    query: GeocodeQuery,
    options: &RequestOptions,
) -> Result<GeocodeResult, GeocodeError> {
    let mut addresses = entry
        .locations
        .into_iter()
        .map(WireLocation::into_address)
        .collect::<Result<Vec<_>, _>>()?;
    options.truncate(&mut addresses);
    Ok(GeocodeResult::new(query, addresses))
}
