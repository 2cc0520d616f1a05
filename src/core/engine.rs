use crate::core::{AnalysisResult, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub output_paths: Vec<String>,
}

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<AnalysisOutcome> {
        tracing::info!("🔍 Starting analysis");
        self.monitor.log_stats("Start");

        // Extract
        let entries = self.pipeline.extract().await?;
        tracing::info!("📂 Found {} files", entries.len());
        self.monitor.log_stats("Scan");

        // Transform
        let result = self.pipeline.transform(entries).await?;
        tracing::info!(
            "📊 Aggregated {} files into {} extension groups",
            result.report.statistics.total_files,
            result.report.files_by_extension.len()
        );
        self.monitor.log_stats("Aggregate");

        // Load
        let output_paths = self.pipeline.load(&result).await?;
        for path in &output_paths {
            tracing::info!("📁 Report saved to: {}", path);
        }
        self.monitor.log_stats("Write");
        self.monitor.log_final_stats();

        Ok(AnalysisOutcome {
            result,
            output_paths,
        })
    }
}
