use crate::domain::model::{HeaderBlock, InputLine, TransformResult, Variant};
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
    fn output_path(&self) -> &str;
    fn variant(&self) -> Variant;
    fn header(&self) -> HeaderBlock;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputLine>>;
    async fn transform(&self, lines: Vec<InputLine>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
