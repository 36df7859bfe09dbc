use crate::core::registry::{fetch_registry, lookup_chain};
use crate::core::render::render_pages;
use crate::core::walker::walk_path;
use crate::core::{ConfigProvider, Pipeline, SourceFetcher, Storage};
use crate::domain::model::{
    ChainId, ChainRegistryEntry, ContractRecord, DeploymentFile, ExtractResult, TransformResult,
};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};

/// Clone, walk, join against the chain registry, render one page per version.
pub struct NetworksPipeline<S: Storage, F: SourceFetcher, C: ConfigProvider> {
    storage: S,
    fetcher: F,
    config: C,
    client: Client,
}

impl<S: Storage, F: SourceFetcher, C: ConfigProvider> NetworksPipeline<S, F, C> {
    pub fn new(storage: S, fetcher: F, config: C) -> Self {
        Self {
            storage,
            fetcher,
            config,
            client: Client::new(),
        }
    }

    fn scratch_dir(&self) -> PathBuf {
        PathBuf::from(self.config.scratch_path())
    }

    fn assets_root(&self) -> PathBuf {
        self.scratch_dir().join(self.config.assets_dir())
    }

    fn read_deployments(&self, assets_root: &Path) -> Result<Vec<DeploymentFile>> {
        let mut deployments = Vec::new();

        for path in walk_path(assets_root)? {
            let relative = path.strip_prefix(assets_root).map_err(|_| {
                EtlError::processing(format!(
                    "{} is outside {}",
                    path.display(),
                    assets_root.display()
                ))
            })?;
            tracing::debug!("Reading deployment file: {}", relative.display());

            let json = fs::read_to_string(&path)?;
            deployments.push(DeploymentFile::parse(relative, &json)?);
        }

        Ok(deployments)
    }
}

/// Joins every `networkAddresses` entry with its registry chain.
pub fn build_records(
    deployments: &[DeploymentFile],
    registry: &[ChainRegistryEntry],
) -> Result<Vec<ContractRecord>> {
    let mut records = Vec::new();

    for deployment in deployments {
        for (chain_key, address) in &deployment.network_addresses {
            let chain_id: ChainId = chain_key.parse().map_err(|_| {
                EtlError::processing(format!(
                    "Chain ID '{}' in {}/{} is not an integer",
                    chain_key, deployment.version, deployment.contract_name
                ))
            })?;
            let chain = lookup_chain(chain_id, registry);

            records.push(ContractRecord {
                name: deployment.contract_name.clone(),
                version: deployment.version.clone(),
                address: address.to_string(),
                chain_id,
                chain_name: chain.name.map(str::to_string),
                block_explorer_url: chain.explorer_url.map(str::to_string),
            });
        }
    }

    Ok(records)
}

#[async_trait::async_trait]
impl<S: Storage, F: SourceFetcher, C: ConfigProvider> Pipeline for NetworksPipeline<S, F, C> {
    async fn extract(&self) -> Result<ExtractResult> {
        let scratch_dir = self.scratch_dir();
        if scratch_dir.exists() {
            tracing::debug!("Removing stale scratch directory: {}", scratch_dir.display());
            fs::remove_dir_all(&scratch_dir)?;
        }

        tracing::info!("Fetching {} into {}", self.config.repository_url(), scratch_dir.display());
        self.fetcher
            .fetch(self.config.repository_url(), &scratch_dir)
            .await?;

        let deployments = self.read_deployments(&self.assets_root())?;
        tracing::info!("Found {} deployment files", deployments.len());

        let registry = fetch_registry(&self.client, self.config.registry_endpoint()).await?;

        Ok(ExtractResult {
            deployments,
            registry,
        })
    }

    async fn transform(&self, data: ExtractResult) -> Result<TransformResult> {
        let records = build_records(&data.deployments, &data.registry)?;
        let unmatched = records.iter().filter(|r| r.chain_name.is_none()).count();
        if unmatched > 0 {
            tracing::debug!("{} contract entries have no registry match", unmatched);
        }

        let pages = render_pages(&records);

        Ok(TransformResult { records, pages })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        self.storage.reset().await?;

        for page in &result.pages {
            tracing::debug!("Writing {} ({} bytes)", page.file_name(), page.content.len());
            self.storage
                .write_file(&page.file_name(), page.content.as_bytes())
                .await?;
        }

        Ok(self.config.output_path().to_string())
    }

    async fn cleanup(&self) -> Result<()> {
        let scratch_dir = self.scratch_dir();
        if scratch_dir.exists() {
            tracing::debug!("Removing scratch directory: {}", scratch_dir.display());
            fs::remove_dir_all(scratch_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Explorer, NetworkAddress};
    use httpmock::prelude::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        resets: Arc<Mutex<usize>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                resets: Arc::new(Mutex::new(0)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn reset(&self) -> Result<()> {
            self.files.lock().await.clear();
            *self.resets.lock().await += 1;
            Ok(())
        }
    }

    /// Writes a fixed asset tree instead of running git.
    struct FixtureFetcher {
        assets: Vec<(&'static str, serde_json::Value)>,
    }

    impl SourceFetcher for FixtureFetcher {
        async fn fetch(&self, _repository_url: &str, destination: &Path) -> Result<()> {
            for (relative, json) in &self.assets {
                let path = destination.join("src/assets").join(relative);
                fs::create_dir_all(path.parent().unwrap())?;
                fs::write(path, serde_json::to_vec(json)?)?;
            }
            Ok(())
        }
    }

    struct MockConfig {
        scratch_path: String,
        registry_endpoint: String,
    }

    impl ConfigProvider for MockConfig {
        fn repository_url(&self) -> &str {
            "https://github.com/safe-global/safe-deployments/"
        }

        fn scratch_path(&self) -> &str {
            &self.scratch_path
        }

        fn assets_dir(&self) -> &str {
            "src/assets"
        }

        fn registry_endpoint(&self) -> &str {
            &self.registry_endpoint
        }

        fn output_path(&self) -> &str {
            "test_output"
        }
    }

    fn pipeline_for(
        temp_dir: &TempDir,
        registry_endpoint: String,
        assets: Vec<(&'static str, serde_json::Value)>,
    ) -> (NetworksPipeline<MockStorage, FixtureFetcher, MockConfig>, MockStorage) {
        let storage = MockStorage::new();
        let config = MockConfig {
            scratch_path: temp_dir
                .path()
                .join("deployments")
                .to_string_lossy()
                .into_owned(),
            registry_endpoint,
        };
        let pipeline = NetworksPipeline::new(storage.clone(), FixtureFetcher { assets }, config);
        (pipeline, storage)
    }

    fn registry_entry(chain_id: u64, name: &str, explorer: &str) -> ChainRegistryEntry {
        ChainRegistryEntry {
            chain_id,
            name: name.to_string(),
            explorers: vec![Explorer {
                url: Some(explorer.to_string()),
                name: None,
            }],
        }
    }

    #[test]
    fn test_build_records_joins_registry() {
        let deployments = vec![DeploymentFile {
            version: "v1.3.0".to_string(),
            contract_name: "Safe".to_string(),
            network_addresses: BTreeMap::from([
                ("1".to_string(), NetworkAddress::Single("0x1".to_string())),
                ("999999".to_string(), NetworkAddress::Single("0x2".to_string())),
            ]),
        }];
        let registry = vec![registry_entry(1, "Ethereum Mainnet", "https://etherscan.io")];

        let records = build_records(&deployments, &registry).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chain_id, 1);
        assert_eq!(records[0].chain_name.as_deref(), Some("Ethereum Mainnet"));
        assert_eq!(records[0].block_explorer_url.as_deref(), Some("https://etherscan.io"));
        assert_eq!(records[1].chain_id, 999999);
        assert_eq!(records[1].chain_name, None);
        assert_eq!(records[1].block_explorer_url, None);
    }

    #[test]
    fn test_build_records_rejects_non_integer_chain_id() {
        let deployments = vec![DeploymentFile {
            version: "v1.3.0".to_string(),
            contract_name: "Safe".to_string(),
            network_addresses: BTreeMap::from([(
                "mainnet".to_string(),
                NetworkAddress::Single("0x1".to_string()),
            )]),
        }];

        let result = build_records(&deployments, &[]);
        assert!(matches!(result, Err(EtlError::ProcessingError { .. })));
    }

    #[tokio::test]
    async fn test_extract_reads_assets_and_registry() {
        let temp_dir = TempDir::new().unwrap();
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/chains.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"name": "Ethereum Mainnet", "chainId": 1,
                     "explorers": [{"name": "etherscan", "url": "https://etherscan.io"}]}
                ]));
        });

        let (pipeline, _) = pipeline_for(
            &temp_dir,
            server.url("/chains.json"),
            vec![
                ("v1.3.0/Safe.json", serde_json::json!({"networkAddresses": {"1": "0x1"}})),
                ("v1.0.0/Safe.json", serde_json::json!({"networkAddresses": {"1": "0x0"}})),
            ],
        );

        let result = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(result.registry.len(), 1);
        let versions: Vec<&str> = result
            .deployments
            .iter()
            .map(|d| d.version.as_str())
            .collect();
        assert_eq!(versions, vec!["v1.0.0", "v1.3.0"]);
    }

    #[tokio::test]
    async fn test_extract_replaces_stale_scratch_directory() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("deployments/src/assets/v0.0.1");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("Old.json"), r#"{"networkAddresses": {}}"#).unwrap();

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/chains.json");
            then.status(200).json_body(serde_json::json!([]));
        });

        let (pipeline, _) = pipeline_for(
            &temp_dir,
            server.url("/chains.json"),
            vec![("v1.3.0/Safe.json", serde_json::json!({"networkAddresses": {}}))],
        );

        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.deployments.len(), 1);
        assert_eq!(result.deployments[0].version, "v1.3.0");
    }

    #[tokio::test]
    async fn test_extract_missing_assets_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, _) = pipeline_for(&temp_dir, "http://127.0.0.1:1/".to_string(), vec![]);

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(EtlError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_renders_pages() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, _) = pipeline_for(&temp_dir, "http://unused".to_string(), vec![]);

        let data = ExtractResult {
            deployments: vec![
                DeploymentFile {
                    version: "v1.0.0".to_string(),
                    contract_name: "Proxy".to_string(),
                    network_addresses: BTreeMap::from([(
                        "3".to_string(),
                        NetworkAddress::Single("0xABC".to_string()),
                    )]),
                },
                DeploymentFile {
                    version: "v1.3.0".to_string(),
                    contract_name: "Safe".to_string(),
                    network_addresses: BTreeMap::from([(
                        "1".to_string(),
                        NetworkAddress::Single("0xABC".to_string()),
                    )]),
                },
            ],
            registry: vec![
                registry_entry(1, "Ethereum Mainnet", "https://etherscan.io"),
                registry_entry(3, "Ropsten", "https://ropsten.etherscan.io"),
            ],
        };

        let result = pipeline.transform(data).await.unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.pages.len(), 2);
        assert_eq!(result.pages[0].version, "v1.3.0");
        assert!(result.pages[0]
            .content
            .contains("- `Safe.sol`: [0xABC](https://etherscan.io/address/0xABC)"));
        assert!(result.pages[1].content.contains("- `Proxy.sol`: 0xABC\n"));
    }

    #[tokio::test]
    async fn test_load_resets_and_writes_pages() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, storage) = pipeline_for(&temp_dir, "http://unused".to_string(), vec![]);
        storage.write_file("stale.md", b"old").await.unwrap();

        let result = TransformResult {
            records: vec![],
            pages: vec![crate::domain::model::VersionPage {
                version: "v1.4.1".to_string(),
                content: "# v1.4.1\n".to_string(),
            }],
        };

        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "test_output");
        assert_eq!(*storage.resets.lock().await, 1);
        assert!(storage.get_file("stale.md").await.is_none());
        assert_eq!(storage.get_file("v1.4.1.md").await.unwrap(), b"# v1.4.1\n");
    }

    #[tokio::test]
    async fn test_cleanup_removes_scratch_directory() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, _) = pipeline_for(&temp_dir, "http://unused".to_string(), vec![]);
        let scratch = temp_dir.path().join("deployments/src/assets");
        fs::create_dir_all(&scratch).unwrap();

        pipeline.cleanup().await.unwrap();
        assert!(!temp_dir.path().join("deployments").exists());

        // nothing left to remove
        pipeline.cleanup().await.unwrap();
    }
}
