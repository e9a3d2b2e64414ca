use anyhow::Result;

use crate::cli::OutputFormat;
use crate::Location;

use super::super::Container;
use super::geocode_controller::format_result;

pub struct ReverseController<'a> {
    container: &'a Container,
}

impl<'a> ReverseController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn reverse(&self, lat: f64, lng: f64, format: OutputFormat) -> Result<String> {
        let location = Location::new(lat, lng)?;
        let use_case = self.container.geocode_use_case();
        let result = use_case.reverse(location).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            OutputFormat::Text => format_result(&result),
        })
    }
}
