use crate::domain::model::{ExtractResult, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Output sink for generated pages.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Deletes everything under the storage root and recreates it empty.
    fn reset(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Brings a copy of the deployments repository onto local disk.
pub trait SourceFetcher: Send + Sync {
    fn fetch(
        &self,
        repository_url: &str,
        destination: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn repository_url(&self) -> &str;
    fn scratch_path(&self) -> &str;
    fn assets_dir(&self) -> &str;
    fn registry_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractResult>;
    async fn transform(&self, data: ExtractResult) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;

    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}
