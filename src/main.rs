use anyhow::Context;
use clap::Parser;
use supported_networks::core::ConfigProvider;
use supported_networks::utils::error::ErrorSeverity;
use supported_networks::utils::{logger, validation::Validate};
use supported_networks::{CliConfig, EtlEngine, GitCli, LocalStorage, NetworksPipeline, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting supported-networks generator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            let monitor = cli.monitor || config.monitoring_enabled();
            run(config, monitor).await
        }
        None => {
            let monitor = cli.monitor;
            run(cli, monitor).await
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<C>(config: C, monitor_enabled: bool) -> i32
where
    C: ConfigProvider + Validate + 'static,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return 1;
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = NetworksPipeline::new(storage, GitCli::new(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Supported network pages generated");
            println!("✅ Supported network pages written to: {}", output_path);
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    }
}
