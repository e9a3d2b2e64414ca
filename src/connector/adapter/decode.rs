use serde_json::Value;
use tracing::warn;

use crate::application::HttpResponse;
use crate::domain::{GeocodeError, ProviderErrorKind};

const MAX_ERROR_BODY: usize = 200;

/// Turns a non-2xx HTTP status into a provider error.
pub fn classify_http_status(provider: &str, response: &HttpResponse) -> Result<(), GeocodeError> {
    if response.is_success() {
        return Ok(());
    }

    let kind = ProviderErrorKind::from_http_status(response.status);
    let mut body = response.text_lossy();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    warn!("{} returned HTTP {}: {}", provider, response.status, body);

    Err(GeocodeError::provider(
        kind,
        format!("{} returned HTTP {}: {}", provider, response.status, body.trim()),
    ))
}

/// Generic decode step: raw bytes to a JSON tree.
pub fn decode_json(provider: &str, body: &[u8]) -> Result<Value, GeocodeError> {
    serde_json::from_slice(body).map_err(|e| {
        GeocodeError::malformed_response(format!("{} response is not valid JSON: {}", provider, e))
    })
}
