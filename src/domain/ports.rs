use crate::domain::model::{AnalysisResult, FileEntry, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn directory(&self) -> &str;
    /// None 表示不過濾副檔名
    fn extensions(&self) -> Option<&[String]>;
    fn large_file_threshold_mb(&self) -> f64;
    fn report_top(&self) -> usize;
    fn output_dir(&self) -> &str;
    fn report_name(&self) -> &str;
    fn formats(&self) -> Vec<OutputFormat>;
    fn report_enabled(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<FileEntry>>;
    async fn transform(&self, entries: Vec<FileEntry>) -> Result<AnalysisResult>;
    async fn load(&self, result: &AnalysisResult) -> Result<Vec<String>>;
}
