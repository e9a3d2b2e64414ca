use crate::domain::GeocodeError;

/// A provider credential, validated once at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, GeocodeError> {
        let key: String = key.into();
        if key.trim().is_empty() {
            return Err(GeocodeError::invalid_configuration(
                "an API key is required for this provider",
            ));
        }
        Ok(Self(key))
    }

    /// Reads the key from an environment variable.
    pub fn from_env(var: &str) -> Result<Self, GeocodeError> {
        let key = std::env::var(var).map_err(|_| {
            GeocodeError::invalid_configuration(format!("environment variable {} is not set", var))
        })?;
        Self::new(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
