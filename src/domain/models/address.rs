use serde::{Deserialize, Serialize};

use super::{AddressType, Bounds, Location, Precision};

/// A provider component that has no normalized counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub kind: String,
    pub long_name: String,
    pub short_name: String,
}

impl AddressComponent {
    pub fn new(kind: impl Into<String>, long_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            long_name: long_name.into(),
            short_name: short_name.into(),
        }
    }
}

/// Normalized structured address fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub locality: Option<String>,
    pub county: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl AddressComponents {
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.neighborhood.is_none()
            && self.locality.is_none()
            && self.county.is_none()
            && self.region.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }

    /// Composes a one-line address: `street, locality, region postal_code, country`.
    pub fn compose(&self) -> String {
        let region_line = match (self.region.as_deref(), self.postal_code.as_deref()) {
            (Some(region), Some(zip)) => Some(format!("{} {}", region, zip)),
            (Some(region), None) => Some(region.to_string()),
            (None, Some(zip)) => Some(zip.to_string()),
            (None, None) => None,
        };

        [
            self.street.clone(),
            self.locality.clone(),
            region_line,
            self.country.clone(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// One normalized geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    formatted_address: String,
    location: Location,
    components: AddressComponents,
    extra_components: Vec<AddressComponent>,
    address_type: AddressType,
    precision: Option<Precision>,
    bounds: Option<Bounds>,
    partial_match: bool,
    provider: String,
}

impl Address {
    pub fn new(
        formatted_address: impl Into<String>,
        location: Location,
        address_type: AddressType,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            location,
            components: AddressComponents::default(),
            extra_components: Vec::new(),
            address_type,
            precision: None,
            bounds: None,
            partial_match: false,
            provider: provider.into(),
        }
    }

    pub fn with_components(mut self, components: AddressComponents) -> Self {
        self.components = components;
        self
    }

    pub fn with_extra_components(mut self, extra: Vec<AddressComponent>) -> Self {
        self.extra_components = extra;
        self
    }

    pub fn with_precision(mut self, precision: Option<Precision>) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_partial_match(mut self, partial_match: bool) -> Self {
        self.partial_match = partial_match;
        self
    }

    pub fn formatted_address(&self) -> &str {
        &self.formatted_address
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn components(&self) -> &AddressComponents {
        &self.components
    }

    pub fn extra_components(&self) -> &[AddressComponent] {
        &self.extra_components
    }

    pub fn extra_component(&self, kind: &str) -> Option<&AddressComponent> {
        self.extra_components.iter().find(|c| c.kind == kind)
    }

    pub fn address_type(&self) -> &AddressType {
        &self.address_type
    }

    pub fn precision(&self) -> Option<Precision> {
        self.precision
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn is_partial_match(&self) -> bool {
        self.partial_match
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn display_line(&self) -> String {
        format!(
            "{} ({:.6}, {:.6}) [{}]",
            self.formatted_address,
            self.location.latitude(),
            self.location.longitude(),
            self.address_type
        )
    }
}
