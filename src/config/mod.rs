pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/safe-global/safe-deployments/";
pub const DEFAULT_SCRATCH_PATH: &str = "./deployments";
pub const DEFAULT_ASSETS_DIR: &str = "src/assets";
pub const DEFAULT_REGISTRY_ENDPOINT: &str = "https://chainid.network/chains.json";
pub const DEFAULT_OUTPUT_PATH: &str = "./safe-smart-account/supported-networks";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "supported-networks")]
#[command(about = "Generate per-version supported network pages from Safe deployment assets")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_REPOSITORY_URL)]
    pub repository_url: String,

    #[arg(long, default_value = DEFAULT_SCRATCH_PATH, help = "Where the repository is cloned")]
    pub scratch_path: String,

    #[arg(long, default_value = DEFAULT_ASSETS_DIR, help = "Deployment assets inside the clone")]
    pub assets_dir: String,

    #[arg(long, default_value = DEFAULT_REGISTRY_ENDPOINT)]
    pub registry_endpoint: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(
        short,
        long,
        help = "Load settings from a TOML file instead of flags",
        conflicts_with_all = [
            "repository_url",
            "scratch_path",
            "assets_dir",
            "registry_endpoint",
            "output_path",
        ]
    )]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn repository_url(&self) -> &str {
        &self.repository_url
    }

    fn scratch_path(&self) -> &str {
        &self.scratch_path
    }

    fn assets_dir(&self) -> &str {
        &self.assets_dir
    }

    fn registry_endpoint(&self) -> &str {
        &self.registry_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_locations(self)
    }
}

/// Checks shared by every config source.
pub fn validate_locations<C: ConfigProvider>(config: &C) -> Result<()> {
    use crate::utils::validation::*;

    validate_non_empty_string("repository_url", config.repository_url())?;
    validate_removable_dir("scratch_path", config.scratch_path())?;
    validate_relative_path("assets_dir", config.assets_dir())?;
    validate_url("registry_endpoint", config.registry_endpoint())?;
    validate_removable_dir("output_path", config.output_path())?;
    validate_disjoint_paths(
        "scratch_path",
        config.scratch_path(),
        "output_path",
        config.output_path(),
    )?;
    Ok(())
}
