pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{git::GitCli, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::NetworksPipeline};
pub use utils::error::{EtlError, Result};
