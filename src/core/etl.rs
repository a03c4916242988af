use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting report generation");

        // Extract
        let document = self.pipeline.extract().await?;
        tracing::info!("Read organisation document ({} bytes)", document.len());

        // Transform
        let report = self.pipeline.transform(document).await?;
        tracing::info!("Built report with {} employee rows", report.len());
        for (department, count) in report.department_counts() {
            tracing::debug!("{}: {} employees", department, count);
        }

        // Load
        let output_path = self.pipeline.load(report).await?;
        tracing::info!(
            "Report saved to: {} in {:?}",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
