use crate::domain::model::{Dataset, TransformResult};
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
    fn zips_file(&self) -> &str;
    fn plans_file(&self) -> &str;
    fn queries_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn print_to_stdout(&self) -> bool;

    fn wants_format(&self, format: &str) -> bool {
        self.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
