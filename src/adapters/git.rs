use crate::core::SourceFetcher;
use crate::utils::error::{EtlError, Result};
use std::path::Path;
use tokio::process::Command;

/// Clones with the `git` binary found on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFetcher for GitCli {
    async fn fetch(&self, repository_url: &str, destination: &Path) -> Result<()> {
        tracing::debug!("{} clone {} {}", self.program, repository_url, destination.display());

        let status = Command::new(&self.program)
            .arg("clone")
            .arg(repository_url)
            .arg(destination)
            .status()
            .await
            .map_err(|e| EtlError::SourceError {
                message: format!("failed to run {}: {}", self.program, e),
            })?;

        // A failed clone surfaces later when the asset tree is missing.
        if !status.success() {
            tracing::warn!("{} clone exited with {}", self.program, status);
        }

        Ok(())
    }
}
