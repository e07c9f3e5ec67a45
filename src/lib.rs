pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::AppConfig;
pub use self::core::{
    cache::ProductCache,
    catalog::ProductCatalog,
    comparator::{detect_shrinkflation, try_detect_shrinkflation},
    engine::ShrinkflationEngine,
    extractor::Extractor,
    reporter::Reporter,
};
pub use domain::model::{Product, ProductPair, ReportRow, SizePrice};
pub use utils::error::{Result, ShrinkError};
