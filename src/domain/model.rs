use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path};

pub type ChainId = u64;

/// Address entry of `networkAddresses`. Newer assets list several per chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NetworkAddress {
    Single(String),
    Many(Vec<String>),
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkAddress::Single(address) => f.write_str(address),
            NetworkAddress::Many(addresses) => f.write_str(&addresses.join(",")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentAsset {
    network_addresses: BTreeMap<String, NetworkAddress>,
}

/// One `<version>/<contractName>.json` asset of the deployments repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentFile {
    pub version: String,
    pub contract_name: String,
    pub network_addresses: BTreeMap<String, NetworkAddress>,
}

impl DeploymentFile {
    pub fn parse(relative_path: &Path, json: &str) -> Result<Self> {
        let (version, contract_name) = Self::identity_from_path(relative_path)?;
        let asset: DeploymentAsset = serde_json::from_str(json)?;

        Ok(Self {
            version,
            contract_name,
            network_addresses: asset.network_addresses,
        })
    }

    /// `v1.3.0/Safe.json` -> (`v1.3.0`, `Safe`). Only the first two segments count.
    pub fn identity_from_path(relative_path: &Path) -> Result<(String, String)> {
        let mut segments = Vec::with_capacity(2);
        for component in relative_path.components() {
            if let Component::Normal(segment) = component {
                let segment = segment.to_str().ok_or_else(|| {
                    EtlError::processing(format!(
                        "Deployment path '{}' is not valid UTF-8",
                        relative_path.display()
                    ))
                })?;
                segments.push(segment);
            }
        }

        let [version, file_name, ..] = segments[..] else {
            return Err(EtlError::processing(format!(
                "Deployment path '{}' is not of the form <version>/<contract>.json",
                relative_path.display()
            )));
        };

        let contract_name = file_name.split('.').next().unwrap_or(file_name);

        Ok((version.to_string(), contract_name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Explorer {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRegistryEntry {
    pub chain_id: ChainId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub explorers: Vec<Explorer>,
}

impl ChainRegistryEntry {
    /// URL of the first listed explorer, if that explorer has one.
    pub fn explorer_url(&self) -> Option<&str> {
        self.explorers
            .first()
            .and_then(|explorer| explorer.url.as_deref())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRecord {
    pub name: String,
    pub version: String,
    pub address: String,
    pub chain_id: ChainId,
    pub chain_name: Option<String>,
    pub block_explorer_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPage {
    pub version: String,
    pub content: String,
}

impl VersionPage {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.version)
    }
}

#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub deployments: Vec<DeploymentFile>,
    pub registry: Vec<ChainRegistryEntry>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ContractRecord>,
    pub pages: Vec<VersionPage>,
}
