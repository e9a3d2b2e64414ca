use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BatchItem, GeocodeError, GeocodeQuery, GeocodeResult, Location};

/// Blocking single-query geocoding.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;

    fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError>;

    fn resolve(&self, query: &GeocodeQuery) -> Result<GeocodeResult, GeocodeError> {
        match query {
            GeocodeQuery::Address(text) => self.geocode(text),
            GeocodeQuery::Reverse(location) => self.reverse_geocode(location),
        }
    }
}

/// Non-blocking single-query geocoding.
///
/// Request building and response mapping happen synchronously; implementors
/// only suspend while the transport is sending.
#[async_trait]
pub trait AsyncGeocoder: Send + Sync {
    /// Provider name, used in logs and on every returned address.
    fn provider(&self) -> &'static str;

    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;

    async fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError>;

    async fn resolve(&self, query: &GeocodeQuery) -> Result<GeocodeResult, GeocodeError> {
        match query {
            GeocodeQuery::Address(text) => self.geocode(text).await,
            GeocodeQuery::Reverse(location) => self.reverse_geocode(location).await,
        }
    }
}

/// Many independent queries in one logical call.
///
/// The returned vector has exactly one [`BatchItem`] per input, at the same
/// position. A failure at one position never affects another.
#[async_trait]
pub trait BatchGeocoder: Send + Sync {
    async fn geocode_batch(&self, addresses: &[String]) -> Vec<BatchItem>;

    async fn reverse_geocode_batch(&self, locations: &[Location]) -> Vec<BatchItem>;
}

#[async_trait]
impl<T: AsyncGeocoder + ?Sized> AsyncGeocoder for Arc<T> {
    fn provider(&self) -> &'static str {
        (**self).provider()
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        (**self).geocode(address).await
    }

    async fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError> {
        (**self).reverse_geocode(location).await
    }
}

#[async_trait]
impl<T: BatchGeocoder + ?Sized> BatchGeocoder for Arc<T> {
    async fn geocode_batch(&self, addresses: &[String]) -> Vec<BatchItem> {
        (**self).geocode_batch(addresses).await
    }

    async fn reverse_geocode_batch(&self, locations: &[Location]) -> Vec<BatchItem> {
        (**self).reverse_geocode_batch(locations).await
    }
}
