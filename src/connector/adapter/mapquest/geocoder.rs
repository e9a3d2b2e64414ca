use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::request::{AddressAction, BatchAction, MapQuestAction, MapQuestRequest, ReverseAction};
use super::response::{MapQuestResponse, PROVIDER};
use crate::application::{AsyncGeocoder, BatchGeocoder, HttpTransport, SynthesizedBatch};
use crate::domain::{
    ApiKey, BatchItem, Bounds, GeocodeError, GeocodeQuery, GeocodeResult, Location,
    RequestOptions, RequestVerb,
};

pub const MAPQUEST_API_KEY_ENV: &str = "MAPQUEST_API_KEY";

/// MapQuest geocoding (commercial or open-data host).
///
/// Settings are fixed once built: every `with_*` call returns a new geocoder,
/// and each request snapshots the settings it was built from. Cloning is cheap
/// and shares the transport.
///
/// Supports forward, reverse and native batch geocoding. MapQuest has no
/// reverse batch endpoint, so [`BatchGeocoder::reverse_geocode_batch`] issues
/// single reverse calls.
#[derive(Clone)]
pub struct MapQuestGeocoder {
    key: ApiKey,
    transport: Arc<dyn HttpTransport>,
    options: RequestOptions,
    bounding_box: Option<Bounds>,
    use_open_data: bool,
    verb: RequestVerb,
}

impl MapQuestGeocoder {
    /// Fails with `InvalidConfiguration` when `key` is blank.
    pub fn new(key: &str, transport: Arc<dyn HttpTransport>) -> Result<Self, GeocodeError> {
        Ok(Self::with_key(ApiKey::new(key)?, transport))
    }

    pub fn with_key(key: ApiKey, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            key,
            transport,
            options: RequestOptions::default(),
            bounding_box: None,
            use_open_data: false,
            verb: RequestVerb::default(),
        }
    }

    /// Reads the key from `MAPQUEST_API_KEY`.
    pub fn from_env(transport: Arc<dyn HttpTransport>) -> Result<Self, GeocodeError> {
        Ok(Self::with_key(ApiKey::from_env(MAPQUEST_API_KEY_ENV)?, transport))
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_bounding_box(mut self, bounding_box: Option<Bounds>) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    pub fn with_open_data(mut self, use_open_data: bool) -> Self {
        self.use_open_data = use_open_data;
        self
    }

    pub fn with_verb(mut self, verb: &str) -> Self {
        self.verb = RequestVerb::new(verb);
        self
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn bounding_box(&self) -> Option<&Bounds> {
        self.bounding_box.as_ref()
    }

    pub fn uses_open_data(&self) -> bool {
        self.use_open_data
    }

    /// Builds the request for `action` from the current settings.
    pub fn request<A: MapQuestAction>(&self, action: A) -> MapQuestRequest<A> {
        MapQuestRequest::with_key(self.key.clone(), action)
            .with_options(self.options.clone())
            .with_bounding_box(self.bounding_box)
            .with_open_data(self.use_open_data)
            .with_verb(self.verb.as_str())
    }

    async fn send<A: MapQuestAction>(
        &self,
        request: &MapQuestRequest<A>,
    ) -> Result<MapQuestResponse, GeocodeError> {
        let http_request = request.to_http_request()?;
        debug!("MapQuest {} request: {}", request.action().action(), http_request.redacted_url());

        let response = self.transport.send(http_request).await?;
        MapQuestResponse::from_http(&response)
    }

    async fn send_batch(
        &self,
        chunk: &[(usize, &String)],
    ) -> Result<Vec<Result<GeocodeResult, GeocodeError>>, GeocodeError> {
        let locations = chunk.iter().map(|(_, text)| (*text).clone()).collect();
        let queries = chunk
            .iter()
            .map(|(_, text)| GeocodeQuery::address(text.as_str()))
            .collect();

        let request = self.request(BatchAction::new(locations));
        let response = self.send(&request).await?;
        response.into_batch(queries, &self.options)
    }
}

fn require_text(address: &str) -> Result<(), GeocodeError> {
    if address.trim().is_empty() {
        return Err(GeocodeError::invalid_input("address must not be blank"));
    }
    Ok(())
}

#[async_trait]
impl AsyncGeocoder for MapQuestGeocoder {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        require_text(address)?;

        let request = self.request(AddressAction::new(address));
        let response = self.send(&request).await?;
        let result = response.into_single(GeocodeQuery::address(address), &self.options)?;

        debug!("MapQuest mapped {} addresses for \"{}\"", result.len(), address);
        Ok(result)
    }

    async fn reverse_geocode(&self, location: &Location) -> Result<GeocodeResult, GeocodeError> {
        let request = self.request(ReverseAction::new(*location));
        let response = self.send(&request).await?;
        let result = response.into_single(GeocodeQuery::reverse(*location), &self.options)?;

        debug!("MapQuest mapped {} addresses for ({})", result.len(), location);
        Ok(result)
    }
}

#[async_trait]
impl BatchGeocoder for MapQuestGeocoder {
    async fn geocode_batch(&self, addresses: &[String]) -> Vec<BatchItem> {
        let mut outcomes: Vec<Option<Result<GeocodeResult, GeocodeError>>> =
            vec![None; addresses.len()];

        let mut pending = Vec::with_capacity(addresses.len());
        for (position, address) in addresses.iter().enumerate() {
            match require_text(address) {
                Ok(()) => pending.push((position, address)),
                Err(e) => outcomes[position] = Some(Err(e)),
            }
        }

        for chunk in pending.chunks(BatchAction::MAX_LOCATIONS) {
            match self.send_batch(chunk).await {
                Ok(results) => {
                    for ((position, _), outcome) in chunk.iter().zip(results) {
                        outcomes[*position] = Some(outcome);
                    }
                }
                Err(e) => {
                    warn!("MapQuest batch of {} locations failed: {}", chunk.len(), e);
                    for (position, _) in chunk {
                        outcomes[*position] = Some(Err(e.clone()));
                    }
                }
            }
        }

        addresses
            .iter()
            .zip(outcomes)
            .map(|(address, outcome)| {
                let outcome = outcome.unwrap_or_else(|| {
                    Err(GeocodeError::malformed_response("no result for batch position"))
                });
                BatchItem::new(GeocodeQuery::address(address.as_str()), outcome)
            })
            .collect()
    }

    async fn reverse_geocode_batch(&self, locations: &[Location]) -> Vec<BatchItem> {
        SynthesizedBatch::new(self.clone())
            .reverse_geocode_batch(locations)
            .await
    }
}
