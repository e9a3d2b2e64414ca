use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::{AsyncGeocoder, BatchGeocoder, GeocodeUseCase, HttpTransport};
use crate::cli::Provider;
use crate::connector::adapter::{
    GoogleGeocoder, MapQuestGeocoder, ReqwestTransport, GOOGLE_API_KEY_ENV, MAPQUEST_API_KEY_ENV,
};
use crate::domain::{ApiKey, Bounds, RequestOptions};

pub struct ContainerConfig {
    pub provider: Provider,
    /// Falls back to the provider's environment variable when `None`.
    pub api_key: Option<String>,
    /// MapQuest only: use the open-data host.
    pub open_data: bool,
    pub bounding_box: Option<Bounds>,
    pub max_results: Option<u32>,
    pub locale: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Mapquest,
            api_key: None,
            open_data: false,
            bounding_box: None,
            max_results: None,
            locale: None,
            timeout_secs: 30,
        }
    }
}

impl ContainerConfig {
    fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new();
        if let Some(max) = self.max_results {
            options = options.with_max_results(max);
        }
        if let Some(locale) = self.locale.as_deref() {
            options = options.with_locale(locale);
        }
        options
    }

    fn api_key(&self) -> Result<ApiKey> {
        let env_var = match self.provider {
            Provider::Mapquest => MAPQUEST_API_KEY_ENV,
            Provider::Google => GOOGLE_API_KEY_ENV,
        };
        let key = match self.api_key.as_deref() {
            Some(key) => ApiKey::new(key),
            None => ApiKey::from_env(env_var),
        };
        key.with_context(|| format!("pass --key or set {}", env_var))
    }
}

pub struct Container {
    use_case: GeocodeUseCase,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Builds the container over an arbitrary transport.
    pub fn with_transport(config: ContainerConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let key = config.api_key()?;
        let options = config.request_options();

        let use_case = match config.provider {
            Provider::Mapquest => {
                debug!(
                    "Using MapQuest ({} host)",
                    if config.open_data { "open data" } else { "commercial" }
                );
                let geocoder = Arc::new(
                    MapQuestGeocoder::with_key(key, transport)
                        .with_options(options)
                        .with_bounding_box(config.bounding_box)
                        .with_open_data(config.open_data),
                );
                GeocodeUseCase::new(geocoder.clone() as Arc<dyn AsyncGeocoder>)
                    .with_batch(geocoder as Arc<dyn BatchGeocoder>)
            }
            Provider::Google => {
                debug!("Using Google");
                if config.open_data {
                    tracing::warn!("--open-data only applies to MapQuest; ignoring");
                }
                let geocoder = GoogleGeocoder::with_key(key, transport)
                    .with_options(options)
                    .with_bounding_box(config.bounding_box);
                GeocodeUseCase::new(Arc::new(geocoder))
            }
        };

        Ok(Self { use_case, config })
    }

    pub fn geocode_use_case(&self) -> &GeocodeUseCase {
        &self.use_case
    }

    pub fn provider(&self) -> Provider {
        self.config.provider
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockTransport;

    fn config(provider: Provider) -> ContainerConfig {
        ContainerConfig {
            provider,
            api_key: Some("test-key".to_string()),
            ..ContainerConfig::default()
        }
    }

    #[test]
    fn test_mapquest_has_native_batch() {
        let container =
            Container::with_transport(config(Provider::Mapquest), Arc::new(MockTransport::new())).unwrap();
        assert!(container.geocode_use_case().has_native_batch());
        assert_eq!(container.geocode_use_case().provider(), "mapquest");
    }

    #[test]
    fn test_google_batch_is_synthesized() {
        let container =
            Container::with_transport(config(Provider::Google), Arc::new(MockTransport::new())).unwrap();
        assert!(!container.geocode_use_case().has_native_batch());
        assert_eq!(container.geocode_use_case().provider(), "google");
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let mut config = config(Provider::Google);
        config.api_key = Some("  ".to_string());
        let err = Container::with_transport(config, Arc::new(MockTransport::new()))
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains(GOOGLE_API_KEY_ENV));
    }
}
