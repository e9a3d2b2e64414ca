use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::use_cases::{GeocodeTask, SynthesizedBatch};
use crate::application::{AsyncGeocoder, BatchGeocoder};
use crate::domain::{BatchItem, GeocodeError, GeocodeQuery, GeocodeResult, Location};

/// Entry point used by the CLI controllers.
///
/// Batch calls go to the provider's native batch implementation when one was
/// composed in, otherwise they are synthesized from single calls.
pub struct GeocodeUseCase {
    geocoder: Arc<dyn AsyncGeocoder>,
    batch: Arc<dyn BatchGeocoder>,
    native_batch: bool,
}

impl GeocodeUseCase {
    pub fn new(geocoder: Arc<dyn AsyncGeocoder>) -> Self {
        let batch: Arc<dyn BatchGeocoder> = Arc::new(SynthesizedBatch::new(geocoder.clone()));
        Self {
            geocoder,
            batch,
            native_batch: false,
        }
    }

    pub fn with_batch(mut self, batch: Arc<dyn BatchGeocoder>) -> Self {
        self.batch = batch;
        self.native_batch = true;
        self
    }

    pub fn provider(&self) -> &'static str {
        self.geocoder.provider()
    }

    pub fn has_native_batch(&self) -> bool {
        self.native_batch
    }

    pub async fn execute(&self, query: GeocodeQuery) -> Result<GeocodeResult, GeocodeError> {
        info!("Geocoding {} with {}", query, self.provider());

        let start_time = Instant::now();
        let result = self.geocoder.resolve(&query).await?;

        info!(
            "Found {} results in {:.2}s",
            result.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        self.execute(GeocodeQuery::address(address)).await
    }

    pub async fn reverse(&self, location: Location) -> Result<GeocodeResult, GeocodeError> {
        self.execute(GeocodeQuery::reverse(location)).await
    }

    pub async fn execute_batch(&self, addresses: &[String]) -> Vec<BatchItem> {
        info!(
            "Batch geocoding {} addresses with {} ({})",
            addresses.len(),
            self.provider(),
            if self.native_batch { "native" } else { "synthesized" }
        );

        let start_time = Instant::now();
        let items = self.batch.geocode_batch(addresses).await;

        let failed = items.iter().filter(|item| !item.is_ok()).count();
        if failed > 0 {
            warn!("{} of {} batch queries failed", failed, items.len());
        }
        info!(
            "Batch finished in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
        items
    }

    /// Starts `query` in the background and returns a cancellable handle.
    pub fn submit(&self, query: GeocodeQuery) -> GeocodeTask {
        GeocodeTask::spawn(self.geocoder.clone(), query)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{GeocodeOutcome, ProviderErrorKind};

    struct CountryGeocoder;

    #[async_trait]
    impl AsyncGeocoder for CountryGeocoder {
        fn provider(&self) -> &'static str {
            "country"
        }

        async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
            if address.is_empty() {
                return Err(GeocodeError::provider(
                    ProviderErrorKind::MalformedRequest,
                    "empty query",
                ));
            }
            Ok(GeocodeResult::empty(GeocodeQuery::address(address)))
        }

        async fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError> {
            Ok(GeocodeResult::empty(GeocodeQuery::reverse(*location)))
        }
    }

    #[tokio::test]
    async fn test_batch_is_synthesized_without_native_support() {
        let use_case = GeocodeUseCase::new(Arc::new(CountryGeocoder));
        assert!(!use_case.has_native_batch());

        let items = use_case
            .execute_batch(&["Norway".to_string(), String::new()])
            .await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(!items[1].is_ok());
    }

    #[tokio::test]
    async fn test_submit_returns_completed_outcome() {
        let use_case = GeocodeUseCase::new(Arc::new(CountryGeocoder));
        let task = use_case.submit(GeocodeQuery::address("Chile"));
        assert!(matches!(task.outcome().await, GeocodeOutcome::Completed(_)));
    }
}
