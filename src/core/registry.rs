use crate::domain::model::{ChainId, ChainRegistryEntry};
use crate::utils::error::Result;
use reqwest::Client;

/// Registry data joined onto a deployment entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainDetails<'a> {
    pub name: Option<&'a str>,
    pub explorer_url: Option<&'a str>,
}

pub async fn fetch_registry(client: &Client, endpoint: &str) -> Result<Vec<ChainRegistryEntry>> {
    tracing::debug!("Fetching chain registry from: {}", endpoint);
    let response = client.get(endpoint).send().await?;
    tracing::debug!("Chain registry response status: {}", response.status());

    let entries: Vec<ChainRegistryEntry> = response.error_for_status()?.json().await?;
    tracing::info!("Loaded {} chains from registry", entries.len());

    Ok(entries)
}

/// First entry with an equal chain ID wins; a miss leaves both fields empty.
pub fn lookup_chain(chain_id: ChainId, registry: &[ChainRegistryEntry]) -> ChainDetails<'_> {
    registry
        .iter()
        .find(|entry| entry.chain_id == chain_id)
        .map(|entry| ChainDetails {
            name: Some(entry.name.as_str()),
            explorer_url: entry.explorer_url(),
        })
        .unwrap_or_default()
}
