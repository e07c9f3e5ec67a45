use crate::core::cache::ProductCache;
use crate::core::extractor::Extractor;
use crate::domain::model::{Product, SizePrice};
use crate::domain::ports::{Fetcher, Storage};
use crate::utils::error::Result;

/// Resolves product URLs through the cache, fetching and extracting on a miss.
pub struct ProductCatalog<F: Fetcher, S: Storage> {
    fetcher: F,
    cache: ProductCache<S>,
    extractor: Extractor,
}

impl<F: Fetcher, S: Storage> ProductCatalog<F, S> {
    pub fn new(fetcher: F, cache: ProductCache<S>) -> Result<Self> {
        Ok(Self {
            fetcher,
            cache,
            extractor: Extractor::new()?,
        })
    }

    /// Fetch and parse a live page. Never touches the cache.
    pub async fn fetch_product(&self, url: &str) -> Result<Product> {
        let html = self.fetcher.fetch(url).await?;
        self.extractor.extract(url, &html)
    }

    /// Cached (size, price) for `url`; a miss fetches the page and caches the result.
    pub async fn resolve(&self, url: &str) -> Result<SizePrice> {
        if let Some(pair) = self.cache.lookup(url).await? {
            tracing::debug!("Cache hit for {}", url);
            return Ok(pair);
        }

        tracing::debug!("Cache miss for {}", url);
        let pair = self.fetch_product(url).await?.size_price();
        self.cache.store(url, pair).await?;
        Ok(pair)
    }
}
