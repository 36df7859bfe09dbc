use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs all phases, then always attempts cleanup. A cleanup failure is
    /// logged and never replaces the run's own result.
    pub async fn run(&self) -> Result<String> {
        let outcome = self.run_phases().await;

        if let Err(e) = self.pipeline.cleanup().await {
            tracing::warn!("Cleanup failed: {}", e);
        }
        self.monitor.log_final_stats();

        outcome
    }

    async fn run_phases(&self) -> Result<String> {
        tracing::info!("Extracting deployments and chain registry...");
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} deployment files and {} registry chains",
            extracted.deployments.len(),
            extracted.registry.len()
        );
        self.monitor.log_stats("Extract");

        tracing::info!("Transforming...");
        let transformed = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "Joined {} contract entries into {} version pages",
            transformed.records.len(),
            transformed.pages.len()
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Writing pages...");
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        Ok(output_path)
    }
}
