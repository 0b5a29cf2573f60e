use crate::domain::model::OutputFormat;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn menu_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
}
