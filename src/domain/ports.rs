use crate::domain::model::ProductPair;
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

/// Downloads a product page. Fails with `NetworkError` on connection errors and non-2xx statuses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn database(&self) -> &str;
    fn cache_path(&self) -> &str;
    fn report_path(&self) -> &str;
    fn price_unit(&self) -> &str;
    fn size_unit(&self) -> &str;
    fn product_pairs(&self) -> &[ProductPair];
    fn site_urls(&self) -> &[String];
    fn top_n(&self) -> usize;
}
