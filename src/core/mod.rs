pub mod cache;
pub mod catalog;
pub mod comparator;
pub mod engine;
pub mod extractor;
pub mod ranking;
pub mod reporter;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{Product, ProductPair, ReportRow, SizePrice};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Storage};
pub use crate::utils::error::Result;
