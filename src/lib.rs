//! Scrapes the plain text metrics page of a power meter gateway and turns
//! selected measurements into a fixed JSON record.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod metrics_text;
pub mod record;

use log::info;
use thiserror::Error;

// Re-export common types for easier access
pub use config::{Config, ConfigError, Settings};
pub use fetch::FetchError;
pub use metrics_text::{extract, Measurement};
pub use record::{assemble, Field, FieldMap, PowerMetrics};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Unable to serialize metrics")]
    Serialize(#[from] serde_json::Error),
}

/// Fetches the payload of the configured device and assembles the record.
pub async fn run(settings: &Settings) -> Result<PowerMetrics, RunError> {
    let address = settings.require_address()?;

    let client = fetch::build_client()?;
    let payload = fetch::fetch_payload(&client, address).await?;

    let metrics = record::assemble(&payload, &settings.fields);
    info!(
        "Assembled metrics for {} of {} requested field(s)",
        Field::ALL.iter().filter(|f| metrics.get(**f).is_some()).count(),
        settings.fields.values().filter(|id| !id.is_empty()).count()
    );
    Ok(metrics)
}

/// Renders `err` followed by every underlying cause, separated by `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
