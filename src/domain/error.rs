use thiserror::Error;

/// Classification of a failure reported by the geocoding provider itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    RateLimited,
    QuotaExceeded,
    InvalidCredentials,
    MalformedRequest,
    Unknown,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::RateLimited => "rate limited",
            ProviderErrorKind::QuotaExceeded => "quota exceeded",
            ProviderErrorKind::InvalidCredentials => "invalid credentials",
            ProviderErrorKind::MalformedRequest => "malformed request",
            ProviderErrorKind::Unknown => "unknown provider failure",
        }
    }

    /// Maps an HTTP status that is not a success onto a provider error kind.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ProviderErrorKind::MalformedRequest,
            401 | 403 => ProviderErrorKind::InvalidCredentials,
            429 => ProviderErrorKind::RateLimited,
            _ => ProviderErrorKind::Unknown,
        }
    }
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

#[derive(Debug, Clone, Error)]
pub enum GeocodeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transport error ({kind:?}): {message}")]
    TransportError {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("Provider error ({kind}): {message}")]
    ProviderError {
        kind: ProviderErrorKind,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GeocodeError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn transport(kind: TransportErrorKind, msg: impl Into<String>) -> Self {
        Self::TransportError {
            kind,
            message: msg.into(),
        }
    }

    pub fn provider(kind: ProviderErrorKind, msg: impl Into<String>) -> Self {
        Self::ProviderError {
            kind,
            message: msg.into(),
        }
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::TransportError { .. })
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::ProviderError { .. })
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    pub fn provider_error_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::ProviderError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
