use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::HttpResponse;
use crate::connector::adapter::decode::{classify_http_status, decode_json};
use crate::domain::{
    Address, AddressComponent, AddressComponents, AddressType, Bounds, GeocodeError,
    GeocodeQuery, GeocodeResult, GoogleAddressType, Location, Precision, ProviderErrorKind,
    RequestOptions,
};

pub const PROVIDER: &str = "google";

#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    #[serde(default)]
    address_components: Vec<WireComponent>,
    #[serde(default)]
    formatted_address: String,
    geometry: WireGeometry,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    partial_match: bool,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireComponent {
    long_name: String,
    #[serde(default)]
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct WireLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct WireBounds {
    northeast: WireLatLng,
    southwest: WireLatLng,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    location: WireLatLng,
    #[serde(default)]
    location_type: Option<String>,
    #[serde(default)]
    viewport: Option<WireBounds>,
    #[serde(default)]
    bounds: Option<WireBounds>,
}

fn location(point: WireLatLng) -> Result<Location, GeocodeError> {
    Location::new(point.lat, point.lng).map_err(|e| {
        GeocodeError::malformed_response(format!("Google returned an invalid coordinate: {}", e))
    })
}

fn precision(location_type: Option<&str>) -> Option<Precision> {
    match location_type? {
        "ROOFTOP" => Some(Precision::Rooftop),
        "RANGE_INTERPOLATED" => Some(Precision::Interpolated),
        "GEOMETRIC_CENTER" => Some(Precision::GeometricCenter),
        "APPROXIMATE" => Some(Precision::Approximate),
        _ => None,
    }
}

/// Classifies a Google `status` value. `Ok(())` covers both `OK` and
/// `ZERO_RESULTS`.
fn check_status(status: &str, message: Option<&str>) -> Result<(), GeocodeError> {
    let kind = match status {
        "OK" | "ZERO_RESULTS" => return Ok(()),
        "OVER_QUERY_LIMIT" => ProviderErrorKind::RateLimited,
        "OVER_DAILY_LIMIT" => ProviderErrorKind::QuotaExceeded,
        "REQUEST_DENIED" => ProviderErrorKind::InvalidCredentials,
        "INVALID_REQUEST" => ProviderErrorKind::MalformedRequest,
        _ => ProviderErrorKind::Unknown,
    };
    let message = match message {
        Some(m) => format!("Google status {}: {}", status, m),
        None => format!("Google status {}", status),
    };
    Err(GeocodeError::provider(kind, message))
}

#[derive(Default)]
struct ComponentMapper {
    street_number: Option<String>,
    route: Option<String>,
    postal_town: Option<String>,
    components: AddressComponents,
    extra: Vec<AddressComponent>,
}

impl ComponentMapper {
    fn slot(&mut self, kind: &str) -> Option<&mut Option<String>> {
        let slot = match kind {
            "street_number" => &mut self.street_number,
            "route" => &mut self.route,
            "neighborhood" | "sublocality" | "sublocality_level_1" => {
                &mut self.components.neighborhood
            }
            "locality" => &mut self.components.locality,
            "postal_town" => &mut self.postal_town,
            "administrative_area_level_2" => &mut self.components.county,
            "administrative_area_level_1" => &mut self.components.region,
            "postal_code" => &mut self.components.postal_code,
            "country" => &mut self.components.country,
            _ => return None,
        };
        Some(slot)
    }

    /// Fills the first empty slot among the component's types. Anything left
    /// over lands in the extras, keyed by its first non-political type.
    fn add(&mut self, component: WireComponent) {
        for kind in &component.types {
            if let Some(slot) = self.slot(kind) {
                if slot.is_none() {
                    *slot = Some(component.long_name);
                    return;
                }
            }
        }

        let kind = component
            .types
            .iter()
            .find(|t| t.as_str() != "political")
            .or_else(|| component.types.first())
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());
        self.extra
            .push(AddressComponent::new(kind, component.long_name, component.short_name));
    }

    fn finish(mut self) -> (AddressComponents, Vec<AddressComponent>) {
        self.components.street = match (self.street_number, self.route) {
            (Some(number), Some(route)) => Some(format!("{} {}", number, route)),
            (number, route) => route.or(number),
        };
        if self.components.locality.is_none() {
            self.components.locality = self.postal_town.take();
        } else if let Some(town) = self.postal_town.take() {
            self.extra
                .push(AddressComponent::new("postal_town", town.clone(), town));
        }
        (self.components, self.extra)
    }
}

impl WireResult {
    fn into_address(self) -> Result<Address, GeocodeError> {
        let point = location(self.geometry.location)?;
        let bounds = match self.geometry.bounds.or(self.geometry.viewport) {
            Some(b) => Some(Bounds::new(location(b.southwest)?, location(b.northeast)?)),
            None => None,
        };

        let mut mapper = ComponentMapper::default();
        for component in self.address_components {
            mapper.add(component);
        }
        let (components, mut extra) = mapper.finish();
        if let Some(place_id) = self.place_id {
            extra.push(AddressComponent::new("place_id", place_id.clone(), place_id));
        }

        let address_type = self
            .types
            .first()
            .map(|t| GoogleAddressType::from_code(t))
            .unwrap_or_else(|| GoogleAddressType::Unknown(String::new()));

        let formatted = if self.formatted_address.trim().is_empty() {
            components.compose()
        } else {
            self.formatted_address
        };

        Ok(Address::new(formatted, point, AddressType::Google(address_type), PROVIDER)
            .with_components(components)
            .with_extra_components(extra)
            .with_precision(precision(self.geometry.location_type.as_deref()))
            .with_bounds(bounds)
            .with_partial_match(self.partial_match))
    }
}

impl GoogleResponse {
    pub fn from_http(response: &HttpResponse) -> Result<Self, GeocodeError> {
        classify_http_status(PROVIDER, response)?;

        let tree = decode_json(PROVIDER, &response.body)?;
        let parsed: GoogleResponse = serde_json::from_value(tree).map_err(|e| {
            GeocodeError::malformed_response(format!("unexpected Google response shape: {}", e))
        })?;

        if let Err(err) = check_status(&parsed.status, parsed.error_message.as_deref()) {
            warn!("{}", err);
            return Err(err);
        }

        debug!("Google returned status {} with {} results", parsed.status, parsed.results.len());
        Ok(parsed)
    }

    pub fn into_result(
        self,
        query: GeocodeQuery,
        options: &RequestOptions,
    ) -> Result<GeocodeResult, GeocodeError> {
        let mut addresses = self
            .results
            .into_iter()
            .map(WireResult::into_address)
            .collect::<Result<Vec<_>, _>>()?;
        options.truncate(&mut addresses);
        Ok(GeocodeResult::new(query, addresses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_HOUSE: &str = r#"{
        "results": [{
            "address_components": [
                {"long_name": "1600", "short_name": "1600", "types": ["street_number"]},
                {"long_name": "Pennsylvania Avenue Northwest", "short_name": "Pennsylvania Avenue NW", "types": ["route"]},
                {"long_name": "Northwest Washington", "short_name": "Northwest Washington", "types": ["neighborhood", "political"]},
                {"long_name": "Washington", "short_name": "Washington", "types": ["locality", "political"]},
                {"long_name": "District of Columbia", "short_name": "DC", "types": ["administrative_area_level_1", "political"]},
                {"long_name": "United States", "short_name": "US", "types": ["country", "political"]},
                {"long_name": "20500", "short_name": "20500", "types": ["postal_code"]},
                {"long_name": "0005", "short_name": "0005", "types": ["postal_code_suffix"]}
            ],
            "formatted_address": "1600 Pennsylvania Avenue NW, Washington, DC 20500, USA",
            "geometry": {
                "location": {"lat": 38.8976763, "lng": -77.0365298},
                "location_type": "ROOFTOP",
                "viewport": {
                    "northeast": {"lat": 38.8990252802915, "lng": -77.0351808197085},
                    "southwest": {"lat": 38.8963273197085, "lng": -77.0378787802915}
                }
            },
            "place_id": "ChIJGVtI4by3t4kRr51d_Qm_x58",
            "types": ["street_address"]
        }],
        "status": "OK"
    }"#;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse::new(200, body)
    }

    fn white_house() -> Address {
        GoogleResponse::from_http(&ok(WHITE_HOUSE))
            .unwrap()
            .into_result(GeocodeQuery::address("white house"), &RequestOptions::default())
            .unwrap()
            .into_addresses()
            .remove(0)
    }

    #[test]
    fn test_maps_components() {
        let address = white_house();
        let components = address.components();

        assert_eq!(components.street.as_deref(), Some("1600 Pennsylvania Avenue Northwest"));
        assert_eq!(components.neighborhood.as_deref(), Some("Northwest Washington"));
        assert_eq!(components.locality.as_deref(), Some("Washington"));
        assert_eq!(components.region.as_deref(), Some("District of Columbia"));
        assert_eq!(components.postal_code.as_deref(), Some("20500"));
        assert_eq!(components.country.as_deref(), Some("United States"));
        assert_eq!(
            address.address_type(),
            &AddressType::Google(GoogleAddressType::StreetAddress)
        );
        assert_eq!(address.precision(), Some(Precision::Rooftop));
    }

    #[test]
    fn test_keeps_unrecognized_components_and_geometry() {
        let address = white_house();

        let suffix = address.extra_component("postal_code_suffix").unwrap();
        assert_eq!(suffix.long_name, "0005");
        assert!(address.extra_component("place_id").is_some());

        let bounds = address.bounds().unwrap();
        assert!(bounds.contains(&address.location()));
    }

    #[test]
    fn test_zero_results_is_empty_success() {
        let body = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let result = GoogleResponse::from_http(&ok(body))
            .unwrap()
            .into_result(GeocodeQuery::address("ThisIsNotARealPlace9999"), &RequestOptions::default())
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_status_table() {
        let cases = [
            ("OVER_QUERY_LIMIT", ProviderErrorKind::RateLimited),
            ("OVER_DAILY_LIMIT", ProviderErrorKind::QuotaExceeded),
            ("REQUEST_DENIED", ProviderErrorKind::InvalidCredentials),
            ("INVALID_REQUEST", ProviderErrorKind::MalformedRequest),
            ("UNKNOWN_ERROR", ProviderErrorKind::Unknown),
            ("SOMETHING_NEW", ProviderErrorKind::Unknown),
        ];
        for (status, kind) in cases {
            let body = format!(
                r#"{{"results": [], "status": "{}", "error_message": "details"}}"#,
                status
            );
            let err = GoogleResponse::from_http(&ok(&body)).unwrap_err();
            assert_eq!(err.provider_error_kind(), Some(kind), "status {}", status);
            assert!(err.to_string().contains("details"));
        }
    }

    #[test]
    fn test_missing_geometry_is_malformed() {
        let body = r#"{"results": [{"formatted_address": "x"}], "status": "OK"}"#;
        let err = GoogleResponse::from_http(&ok(body)).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn test_postal_town_fills_missing_locality() {
        let body = r#"{"results": [{
            "address_components": [
                {"long_name": "Reading", "short_name": "Reading", "types": ["postal_town"]},
                {"long_name": "United Kingdom", "short_name": "GB", "types": ["country", "political"]}
            ],
            "formatted_address": "",
            "geometry": {"location": {"lat": 51.45, "lng": -0.97}},
            "types": ["postal_town"]
        }], "status": "OK"}"#;
        let address = GoogleResponse::from_http(&ok(body))
            .unwrap()
            .into_result(GeocodeQuery::address("Reading"), &RequestOptions::default())
            .unwrap()
            .into_addresses()
            .remove(0);

        assert_eq!(address.components().locality.as_deref(), Some("Reading"));
        assert_eq!(address.formatted_address(), "Reading, United Kingdom");
        assert_eq!(address.precision(), None);
    }

    #[test]
    fn test_order_and_max_results() {
        let body = r#"{"results": [
            {"formatted_address": "first", "geometry": {"location": {"lat": 1.0, "lng": 1.0}}, "types": ["locality"]},
            {"formatted_address": "second", "geometry": {"location": {"lat": 2.0, "lng": 2.0}}, "types": ["locality"]},
            {"formatted_address": "third", "geometry": {"location": {"lat": 3.0, "lng": 3.0}}, "types": ["locality"]}
        ], "status": "OK"}"#;
        let result = GoogleResponse::from_http(&ok(body))
            .unwrap()
            .into_result(
                GeocodeQuery::address("x"),
                &RequestOptions::new().with_max_results(2),
            )
            .unwrap();

        let names: Vec<_> = result.addresses().iter().map(|a| a.formatted_address()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
