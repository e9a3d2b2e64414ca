use serde::{Deserialize, Serialize};

/// Wire format for request payloads and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Xml,
    Csv,
    Kvp,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Xml => "xml",
            DataFormat::Csv => "csv",
            DataFormat::Kvp => "kvp",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == DataFormat::default()
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upper-cased HTTP verb. Blank input falls back to `POST`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestVerb(String);

impl RequestVerb {
    pub const DEFAULT: &'static str = "POST";

    pub fn new(verb: &str) -> Self {
        let trimmed = verb.trim();
        if trimmed.is_empty() {
            Self(Self::DEFAULT.to_string())
        } else {
            Self(trimmed.to_uppercase())
        }
    }

    pub fn get() -> Self {
        Self("GET".to_string())
    }

    pub fn post() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether requests with this verb send their document as the body.
    pub fn carries_payload(&self) -> bool {
        matches!(self.0.as_str(), "POST" | "PUT" | "PATCH")
    }
}

impl Default for RequestVerb {
    fn default() -> Self {
        Self::post()
    }
}

impl std::fmt::Display for RequestVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional request settings recognized across providers.
///
/// Each provider serializes the subset it understands; the rest is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    max_results: Option<u32>,
    locale: Option<String>,
    region: Option<String>,
    result_types: Vec<String>,
    thumb_maps: bool,
    ignore_lat_lng_input: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        // Ensure at least 1 result is requested
        self.max_results = Some(max_results.max(1));
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_result_types(mut self, types: Vec<String>) -> Self {
        self.result_types = types;
        self
    }

    pub fn with_thumb_maps(mut self, thumb_maps: bool) -> Self {
        self.thumb_maps = thumb_maps;
        self
    }

    pub fn with_ignore_lat_lng_input(mut self, ignore: bool) -> Self {
        self.ignore_lat_lng_input = ignore;
        self
    }

    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn result_types(&self) -> &[String] {
        &self.result_types
    }

    pub fn thumb_maps(&self) -> bool {
        self.thumb_maps
    }

    pub fn ignore_lat_lng_input(&self) -> bool {
        self.ignore_lat_lng_input
    }

    /// Keeps the first `max_results` items, if a limit is set.
    pub fn truncate<T>(&self, items: &mut Vec<T>) {
        if let Some(max) = self.max_results {
            items.truncate(max as usize);
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(max) = self.max_results {
            parts.push(format!("max_results={}", max));
        }
        if let Some(ref locale) = self.locale {
            parts.push(format!("locale={}", locale));
        }
        if let Some(ref region) = self.region {
            parts.push(format!("region={}", region));
        }
        if !self.result_types.is_empty() {
            parts.push(format!("result_types={:?}", self.result_types));
        }
        parts.join(", ")
    }
}
