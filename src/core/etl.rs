use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting movie EDA pipeline...");

        // Extract
        let df = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} rows x {} columns",
            df.height(),
            df.width()
        );

        // Transform
        let cleaned = self.pipeline.transform(df).await?;
        tracing::info!("Transformed {} rows", cleaned.height());

        // Load
        let output_path = self.pipeline.load(cleaned).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
