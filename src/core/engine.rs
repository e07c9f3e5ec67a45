use crate::core::cache::ProductCache;
use crate::core::catalog::ProductCatalog;
use crate::core::ranking::{collect_products, rank_products, render_ranking};
use crate::core::reporter::Reporter;
use crate::domain::ports::{ConfigProvider, Fetcher, Storage};
use crate::utils::error::Result;

/// One run: optional ranked listing of the configured sites, then the shrinkflation report.
pub struct ShrinkflationEngine<F: Fetcher, S: Storage, C: ConfigProvider> {
    catalog: ProductCatalog<F, S>,
    reporter: Reporter<S>,
    config: C,
}

impl<F: Fetcher, S: Storage + Clone, C: ConfigProvider> ShrinkflationEngine<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Result<Self> {
        let cache = ProductCache::new(storage.clone(), config.cache_path());
        Ok(Self {
            catalog: ProductCatalog::new(fetcher, cache)?,
            reporter: Reporter::new(storage, config.report_path()),
            config,
        })
    }

    /// Ranked listing text, or `None` when no sites are configured.
    pub async fn ranking(&self) -> Option<String> {
        let urls = self.config.site_urls();
        if urls.is_empty() {
            return None;
        }

        tracing::info!("Ranking {} products...", urls.len());
        let products = rank_products(collect_products(&self.catalog, urls).await);
        Some(render_ranking(&products, self.config.top_n()))
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting shrinkflation run (database: {})", self.config.database());

        if let Some(listing) = self.ranking().await {
            println!("\n{}", listing);
        }

        let pairs = self.config.product_pairs();
        tracing::info!("Comparing {} product pairs...", pairs.len());
        let output_path = self
            .reporter
            .write_report(
                &self.catalog,
                pairs,
                self.config.price_unit(),
                self.config.size_unit(),
            )
            .await?;

        tracing::info!("Report saved to: {}", output_path);
        Ok(output_path)
    }
}
