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

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting SLCSP resolution");
        self.monitor.log_stats("start");

        tracing::info!("Extracting reference data and queries...");
        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} county rows, {} plan rows, {} queries",
            dataset.counties.len(),
            dataset.plans.len(),
            dataset.queries.len()
        );
        self.monitor.log_stats("extract");

        tracing::info!("Resolving second lowest cost Silver plans...");
        let transformed = self.pipeline.transform(dataset).await?;
        self.monitor.log_stats("transform");

        tracing::info!("Writing results...");
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
