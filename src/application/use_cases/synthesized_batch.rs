use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::application::{AsyncGeocoder, BatchGeocoder};
use crate::domain::{BatchItem, GeocodeQuery, Location};

const DEFAULT_CONCURRENCY: usize = 4;

/// Batch geocoding for providers without a native batch endpoint.
///
/// Each query is an independent single call. Up to `concurrency` calls are in
/// flight at once, and results are yielded in input order regardless of which
/// call finishes first.
pub struct SynthesizedBatch<G> {
    geocoder: G,
    concurrency: usize,
}

impl<G: AsyncGeocoder> SynthesizedBatch<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    async fn run(&self, queries: Vec<GeocodeQuery>) -> Vec<BatchItem> {
        debug!(
            "Synthesizing {} batch of {} queries (concurrency {})",
            self.geocoder.provider(),
            queries.len(),
            self.concurrency
        );

        stream::iter(queries.into_iter().enumerate())
            .map(|(position, query)| async move {
                let outcome = self.geocoder.resolve(&query).await;
                if let Err(ref e) = outcome {
                    warn!("Batch position {} ({}) failed: {}", position, query, e);
                }
                BatchItem::new(query, outcome)
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

#[async_trait]
impl<G: AsyncGeocoder> BatchGeocoder for SynthesizedBatch<G> {
    async fn geocode_batch(&self, addresses: &[String]) -> Vec<BatchItem> {
        let queries = addresses.iter().cloned().map(GeocodeQuery::Address).collect();
        self.run(queries).await
    }

    async fn reverse_geocode_batch(&self, locations: &[Location]) -> Vec<BatchItem> {
        let queries = locations.iter().copied().map(GeocodeQuery::Reverse).collect();
        self.run(queries).await
    }
}
