use anyhow::Result;

use crate::cli::OutputFormat;
use crate::GeocodeResult;

use super::super::Container;

pub struct GeocodeController<'a> {
    container: &'a Container,
}

impl<'a> GeocodeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn geocode(&self, address: String, format: OutputFormat) -> Result<String> {
        let use_case = self.container.geocode_use_case();
        let result = use_case.geocode(&address).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            OutputFormat::Text => format_result(&result),
        })
    }
}

pub(super) fn format_result(result: &GeocodeResult) -> String {
    if result.is_empty() {
        return format!("No results found for {}.", result.query());
    }

    let mut output = format!("Found {} results for {}:\n\n", result.len(), result.query());

    for (i, address) in result.addresses().iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, address.formatted_address()));
        output.push_str(&format!(
            "   Location: {:.6}, {:.6}\n",
            address.location().latitude(),
            address.location().longitude()
        ));

        let precision = address
            .precision()
            .map(|p| format!(", {}", p))
            .unwrap_or_default();
        output.push_str(&format!("   Type:     {}{}\n", address.address_type(), precision));

        if address.is_partial_match() {
            output.push_str("   (partial match)\n");
        }
        output.push('\n');
    }

    output
}
