use tokio::runtime::{Builder, Runtime};

use crate::application::{AsyncGeocoder, BatchGeocoder, Geocoder};
use crate::domain::{BatchItem, GeocodeError, GeocodeResult, Location};

/// Exposes an [`AsyncGeocoder`] through the blocking [`Geocoder`] contract.
///
/// Owns a current-thread Tokio runtime that is driven only while a call is
/// blocked. Must not be called from within another async runtime: Tokio
/// panics when `block_on` is nested.
pub struct BlockingGeocoder<G> {
    inner: G,
    runtime: Runtime,
}

impl<G: AsyncGeocoder> BlockingGeocoder<G> {
    pub fn new(inner: G) -> Result<Self, GeocodeError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                GeocodeError::invalid_configuration(format!("failed to build runtime: {}", e))
            })?;
        Ok(Self { inner, runtime })
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: BatchGeocoder> BlockingGeocoder<G> {
    /// Blocking counterpart of [`BatchGeocoder::geocode_batch`].
    pub fn geocode_batch(&self, addresses: &[String]) -> Vec<BatchItem> {
        self.runtime.block_on(self.inner.geocode_batch(addresses))
    }
}

impl<G: AsyncGeocoder> Geocoder for BlockingGeocoder<G> {
    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        self.runtime.block_on(self.inner.geocode(address))
    }

    fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError> {
        self.runtime.block_on(self.inner.reverse_geocode(location))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{GeocodeQuery, ProviderErrorKind};

    struct EchoGeocoder;

    #[async_trait]
    impl AsyncGeocoder for EchoGeocoder {
        fn provider(&self) -> &'static str {
            "echo"
        }

        async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
            tokio::task::yield_now().await;
            Ok(GeocodeResult::empty(GeocodeQuery::address(address)))
        }

        async fn reverse_geocode(&self, _location: &Location) -> Result<GeocodeResult, GeocodeError> {
            Err(GeocodeError::provider(ProviderErrorKind::Unknown, "no reverse"))
        }
    }

    #[test]
    fn test_blocking_calls_drive_inner_geocoder() {
        let geocoder = BlockingGeocoder::new(EchoGeocoder).unwrap();

        let result = geocoder.geocode("Berlin").unwrap();
        assert_eq!(result.query(), &GeocodeQuery::address("Berlin"));
        assert!(result.is_empty());

        let err = geocoder
            .reverse_geocode(&Location::new(0.0, 0.0).unwrap())
            .unwrap_err();
        assert!(err.is_provider_error());
    }

    #[test]
    fn test_resolve_dispatches_on_query_kind() {
        let geocoder = BlockingGeocoder::new(EchoGeocoder).unwrap();
        let result = geocoder.resolve(&GeocodeQuery::address("Rome")).unwrap();
        assert_eq!(result.query(), &GeocodeQuery::address("Rome"));
    }
}
