pub mod file;

use std::io::{self, Read};

use market_entry_core::dataset::seed::seed_dataset;
use market_entry_core::{AnalysisConfig, MarketDataset};

/// Load the dataset from `--dataset`, piped stdin JSON, or the built-in
/// seed data, in that order.
pub fn load_dataset(path: &Option<String>) -> Result<MarketDataset, Box<dyn std::error::Error>> {
    let dataset: MarketDataset = if let Some(ref path) = path {
        file::read_structured(path)?
    } else if let Some(text) = piped_stdin()? {
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse stdin dataset: {e}"))?
    } else {
        tracing::debug!("using built-in seed dataset");
        return Ok(seed_dataset());
    };
    dataset.validate()?;
    tracing::debug!(countries = dataset.snapshots.len(), "dataset loaded");
    Ok(dataset)
}

/// Load `--config` or fall back to the defaults.
pub fn load_config(path: &Option<String>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_structured(path),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Piped stdin contents, or None for an interactive terminal or empty pipe.
fn piped_stdin() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}
