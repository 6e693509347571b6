use crate::core::Pipeline;
use crate::domain::model::{TransformResult, TransformStats};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub stats: TransformStats,
}

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

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let result = self.extract_and_transform().await?;
        let stats = result.stats.clone();

        tracing::info!("Loading {} rules...", result.lines.len());
        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        tracing::info!("Output saved to: {}", output_path);
        Ok(RunSummary { output_path, stats })
    }

    /// 只做讀取與轉換，不寫檔
    pub async fn dry_run(&self) -> Result<TransformResult> {
        let result = self.extract_and_transform().await?;
        self.monitor.log_final_stats();
        Ok(result)
    }

    async fn extract_and_transform(&self) -> Result<TransformResult> {
        tracing::info!("Extracting filter list...");
        let lines = self.pipeline.extract().await?;
        tracing::info!("Extracted {} lines", lines.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Transforming rules...");
        let result = self.pipeline.transform(lines).await?;
        tracing::info!("Transformed into {} rules", result.lines.len());
        self.monitor.log_stats("Transform");

        Ok(result)
    }
}
