use crate::config::{
    validate_locations, DEFAULT_ASSETS_DIR, DEFAULT_OUTPUT_PATH, DEFAULT_REGISTRY_ENDPOINT,
    DEFAULT_REPOSITORY_URL, DEFAULT_SCRATCH_PATH,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_repository_url")]
    pub repository_url: String,
    #[serde(default = "default_scratch_path")]
    pub scratch_path: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_repository_url() -> String {
    DEFAULT_REPOSITORY_URL.to_string()
}

fn default_scratch_path() -> String {
    DEFAULT_SCRATCH_PATH.to_string()
}

fn default_assets_dir() -> String {
    DEFAULT_ASSETS_DIR.to_string()
}

fn default_registry_endpoint() -> String {
    DEFAULT_REGISTRY_ENDPOINT.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repository_url: default_repository_url(),
            scratch_path: default_scratch_path(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_registry_endpoint(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn repository_url(&self) -> &str {
        &self.source.repository_url
    }

    fn scratch_path(&self) -> &str {
        &self.source.scratch_path
    }

    fn assets_dir(&self) -> &str {
        &self.source.assets_dir
    }

    fn registry_endpoint(&self) -> &str {
        &self.registry.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_locations(self)
    }
}
