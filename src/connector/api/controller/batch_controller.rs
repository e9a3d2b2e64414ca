use anyhow::Result;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::BatchItem;

use super::super::Container;

pub struct BatchController<'a> {
    container: &'a Container,
}

impl<'a> BatchController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn batch(&self, addresses: Vec<String>, format: OutputFormat) -> Result<String> {
        let use_case = self.container.geocode_use_case();
        let items = use_case.execute_batch(&addresses).await;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&to_json(&items))?,
            OutputFormat::Text => format_batch(&items),
        })
    }
}

fn to_json(items: &[BatchItem]) -> serde_json::Value {
    let entries = items
        .iter()
        .map(|item| match &item.outcome {
            Ok(result) => json!({
                "query": item.query,
                "addresses": result.addresses(),
            }),
            Err(e) => json!({
                "query": item.query,
                "error": e.to_string(),
            }),
        })
        .collect::<Vec<_>>();
    serde_json::Value::Array(entries)
}

fn format_batch(items: &[BatchItem]) -> String {
    let failed = items.iter().filter(|item| !item.is_ok()).count();
    let mut output = format!("Batch of {} queries ({} failed):\n\n", items.len(), failed);

    for (i, item) in items.iter().enumerate() {
        match &item.outcome {
            Ok(result) => match result.first() {
                Some(best) => output.push_str(&format!(
                    "{}. {} -> {} ({})\n",
                    i + 1,
                    item.query,
                    best.formatted_address(),
                    best.location()
                )),
                None => output.push_str(&format!("{}. {} -> no results\n", i + 1, item.query)),
            },
            Err(e) => output.push_str(&format!("{}. {} -> error: {}\n", i + 1, item.query, e)),
        }
    }

    output
}
