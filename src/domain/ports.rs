use crate::domain::model::Report;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn output_formats(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Raw organisation document.
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, document: String) -> Result<Report>;
    /// Returns the location of the primary output.
    async fn load(&self, report: Report) -> Result<String>;
}
