use log::{debug, info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unable to create HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub fn metrics_url(address: &str) -> String {
    format!("http://{}/metrics", address)
}

pub fn build_client() -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Client)
}

/// Fetches the raw metrics page of the device at `address`.
///
/// The status code is not checked, whatever body the device sends is returned.
pub async fn fetch_payload(client: &reqwest::Client, address: &str) -> Result<String, FetchError> {
    let url = metrics_url(address);
    info!("Fetching metrics from {}", url);

    let response = client.get(&url).send().await
        .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

    let status = response.status();
    if !status.is_success() {
        warn!("{} answered with status {}, using the body anyway", url, status);
    }

    let body = response.text().await
        .map_err(|source| FetchError::Transport { url: url.clone(), source })?;
    debug!("Received {} bytes from {}", body.len(), url);

    Ok(body)
}
