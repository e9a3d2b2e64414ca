use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::AsyncGeocoder;
use crate::domain::{GeocodeError, GeocodeOutcome, GeocodeQuery, TransportErrorKind};

/// Handle to a geocoding query running on the ambient Tokio runtime.
///
/// [`GeocodeTask::cancel`] may be called any number of times, before or after
/// completion. Once cancelled, [`GeocodeTask::outcome`] always reports
/// [`GeocodeOutcome::Cancelled`], even if the provider already answered. A
/// request already on the wire is not recalled. Dropping the handle cancels
/// the task.
pub struct GeocodeTask {
    query: GeocodeQuery,
    token: CancellationToken,
    handle: Option<JoinHandle<GeocodeOutcome>>,
}

impl GeocodeTask {
    /// Spawns `query` on the current runtime. Panics outside a Tokio runtime.
    pub fn spawn<G>(geocoder: G, query: GeocodeQuery) -> Self
    where
        G: AsyncGeocoder + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let task_query = query.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => GeocodeOutcome::Cancelled,
                result = geocoder.resolve(&task_query) => GeocodeOutcome::from_result(result),
            }
        });

        Self {
            query,
            token,
            handle: Some(handle),
        }
    }

    pub fn query(&self) -> &GeocodeQuery {
        &self.query
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!("Cancelling geocode task for {}", self.query);
        }
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Waits for the task and returns its tagged outcome.
    pub async fn outcome(mut self) -> GeocodeOutcome {
        let outcome = match self.handle.take() {
            Some(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => GeocodeOutcome::Cancelled,
                Err(e) => GeocodeOutcome::Failed(GeocodeError::transport(
                    TransportErrorKind::Other,
                    format!("geocode task failed: {}", e),
                )),
            },
            None => GeocodeOutcome::Cancelled,
        };

        if self.token.is_cancelled() {
            return GeocodeOutcome::Cancelled;
        }
        outcome
    }
}

impl Drop for GeocodeTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
