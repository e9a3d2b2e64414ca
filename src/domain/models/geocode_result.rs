use serde::{Deserialize, Serialize};

use super::{Address, Location};
use crate::domain::GeocodeError;

/// What a caller asked for: forward (free text) or reverse (coordinate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeQuery {
    Address(String),
    Reverse(Location),
}

impl GeocodeQuery {
    pub fn address(text: impl Into<String>) -> Self {
        Self::Address(text.into())
    }

    pub fn reverse(location: Location) -> Self {
        Self::Reverse(location)
    }
}

impl std::fmt::Display for GeocodeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeQuery::Address(text) => write!(f, "\"{}\"", text),
            GeocodeQuery::Reverse(location) => write!(f, "({})", location),
        }
    }
}

/// Addresses returned for one query, in provider ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    query: GeocodeQuery,
    addresses: Vec<Address>,
}

impl GeocodeResult {
    pub fn new(query: GeocodeQuery, addresses: Vec<Address>) -> Self {
        Self { query, addresses }
    }

    pub fn empty(query: GeocodeQuery) -> Self {
        Self::new(query, Vec::new())
    }

    pub fn query(&self) -> &GeocodeQuery {
        &self.query
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }

    pub fn first(&self) -> Option<&Address> {
        self.addresses.first()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Outcome of one position in a batch call.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub query: GeocodeQuery,
    pub outcome: Result<GeocodeResult, GeocodeError>,
}

impl BatchItem {
    pub fn new(query: GeocodeQuery, outcome: Result<GeocodeResult, GeocodeError>) -> Self {
        Self { query, outcome }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn result(&self) -> Option<&GeocodeResult> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&GeocodeError> {
        self.outcome.as_ref().err()
    }
}

/// What an asynchronous task handle delivers.
#[derive(Debug, Clone)]
pub enum GeocodeOutcome {
    Completed(GeocodeResult),
    Failed(GeocodeError),
    Cancelled,
}

impl GeocodeOutcome {
    pub fn from_result(result: Result<GeocodeResult, GeocodeError>) -> Self {
        match result {
            Ok(result) => Self::Completed(result),
            Err(e) => Self::Failed(e),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn into_result(self) -> Option<Result<GeocodeResult, GeocodeError>> {
        match self {
            Self::Completed(result) => Some(Ok(result)),
            Self::Failed(e) => Some(Err(e)),
            Self::Cancelled => None,
        }
    }
}
