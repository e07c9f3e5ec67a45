//! Shrinkflation detection between an old and a new version of a product.
//!
//! Both conversion factors multiply the old and the new value alike, so they
//! scale the magnitudes but never change the outcome of the comparison.

use crate::core::catalog::ProductCatalog;
use crate::domain::model::SizePrice;
use crate::domain::ports::{Fetcher, Storage};
use crate::utils::error::{Result, ShrinkError};
use std::str::FromStr;

pub const DEFAULT_PRICE_UNIT: &str = "USD";
pub const DEFAULT_SIZE_UNIT: &str = "oz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceUnit {
    Usd,
    Eur,
    Gbp,
}

impl PriceUnit {
    pub fn factor(self) -> f64 {
        match self {
            PriceUnit::Usd => 1.0,
            PriceUnit::Eur => 0.85,
            PriceUnit::Gbp => 0.72,
        }
    }
}

impl FromStr for PriceUnit {
    type Err = ShrinkError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "USD" => Ok(PriceUnit::Usd),
            "EUR" => Ok(PriceUnit::Eur),
            "GBP" => Ok(PriceUnit::Gbp),
            _ => Err(ShrinkError::InvalidUnitError {
                kind: "price".to_string(),
                code: code.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Ounce,
    Gram,
}

impl SizeUnit {
    pub fn factor(self) -> f64 {
        match self {
            SizeUnit::Ounce => 1.0,
            SizeUnit::Gram => 0.035,
        }
    }
}

impl FromStr for SizeUnit {
    type Err = ShrinkError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "oz" => Ok(SizeUnit::Ounce),
            "g" => Ok(SizeUnit::Gram),
            _ => Err(ShrinkError::InvalidUnitError {
                kind: "size".to_string(),
                code: code.to_string(),
            }),
        }
    }
}

pub fn value_of(pair: SizePrice, size_unit: SizeUnit, price_unit: PriceUnit) -> f64 {
    pair.size() * pair.price() * size_unit.factor() * price_unit.factor()
}

/// True iff the old value is strictly greater than the new one.
pub fn is_shrinkflation(
    old: SizePrice,
    new: SizePrice,
    size_unit: SizeUnit,
    price_unit: PriceUnit,
) -> bool {
    value_of(old, size_unit, price_unit) > value_of(new, size_unit, price_unit)
}

/// Same as [`detect_shrinkflation`] but surfaces the error instead of absorbing it.
pub async fn try_detect_shrinkflation<F: Fetcher, S: Storage>(
    catalog: &ProductCatalog<F, S>,
    old_product: &str,
    new_product: &str,
    price_unit: &str,
    size_unit: &str,
) -> Result<bool> {
    let old = catalog.resolve(old_product).await?;
    let new = catalog.resolve(new_product).await?;

    let price_unit = PriceUnit::from_str(price_unit)?;
    let size_unit = SizeUnit::from_str(size_unit)?;

    let detected = is_shrinkflation(old, new, size_unit, price_unit);
    tracing::debug!(
        "{} -> {}: old value {:.4}, new value {:.4}, shrinkflation: {}",
        old_product,
        new_product,
        value_of(old, size_unit, price_unit),
        value_of(new, size_unit, price_unit),
        detected
    );
    Ok(detected)
}

/// Any network, parse or unit error is logged and reported as `false`.
pub async fn detect_shrinkflation<F: Fetcher, S: Storage>(
    catalog: &ProductCatalog<F, S>,
    old_product: &str,
    new_product: &str,
    price_unit: &str,
    size_unit: &str,
) -> bool {
    match try_detect_shrinkflation(catalog, old_product, new_product, price_unit, size_unit).await
    {
        Ok(detected) => detected,
        Err(e) => {
            tracing::error!(
                "Error detecting shrinkflation for products \"{}\" and \"{}\": {}",
                old_product,
                new_product,
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::ProductCache;
    use crate::core::test_support::{product_page, MockStorage, StubFetcher};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    const OLD: &str = "https://example.com/product1/old";
    const NEW: &str = "https://example.com/product1/new";

    fn catalog(old: (&str, &str), new: (&str, &str)) -> ProductCatalog<StubFetcher, MockStorage> {
        let fetcher = StubFetcher::new()
            .with_page(OLD, &product_page(old.0, old.1))
            .with_page(NEW, &product_page(new.0, new.1));
        ProductCatalog::new(fetcher, ProductCache::new(MockStorage::new(), "cache.json")).unwrap()
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unit_tables() {
        assert_eq!("USD".parse::<PriceUnit>().unwrap().factor(), 1.0);
        assert_eq!("EUR".parse::<PriceUnit>().unwrap().factor(), 0.85);
        assert_eq!("GBP".parse::<PriceUnit>().unwrap().factor(), 0.72);
        assert_eq!("oz".parse::<SizeUnit>().unwrap().factor(), 1.0);
        assert_eq!("g".parse::<SizeUnit>().unwrap().factor(), 0.035);
        assert!("usd".parse::<PriceUnit>().is_err());
        assert!(matches!(
            "lb".parse::<SizeUnit>(),
            Err(ShrinkError::InvalidUnitError { .. })
        ));
    }

    #[test]
    fn test_monotonicity() {
        let (oz, usd) = (SizeUnit::Ounce, PriceUnit::Usd);

        assert!(is_shrinkflation(SizePrice::new(16.0, 4.0), SizePrice::new(12.0, 4.0), oz, usd));
        assert!(!is_shrinkflation(SizePrice::new(12.0, 4.0), SizePrice::new(12.0, 4.0), oz, usd));
        assert!(!is_shrinkflation(SizePrice::new(12.0, 4.0), SizePrice::new(16.0, 4.0), oz, usd));
    }

    #[test]
    fn test_factors_do_not_change_outcome() {
        let old = SizePrice::new(16.0, 4.0);
        let new = SizePrice::new(12.0, 4.0);

        for size_unit in [SizeUnit::Ounce, SizeUnit::Gram] {
            for price_unit in [PriceUnit::Usd, PriceUnit::Eur, PriceUnit::Gbp] {
                assert!(is_shrinkflation(old, new, size_unit, price_unit));
                assert!(!is_shrinkflation(new, old, size_unit, price_unit));
            }
        }
        assert_eq!(value_of(old, SizeUnit::Ounce, PriceUnit::Usd), 64.0);
    }

    #[tokio::test]
    async fn test_detects_smaller_package_at_same_price() {
        let catalog = catalog(("16oz", "$4.00"), ("12oz", "$4.00"));

        assert!(detect_shrinkflation(&catalog, OLD, NEW, DEFAULT_PRICE_UNIT, DEFAULT_SIZE_UNIT).await);
        assert!(!detect_shrinkflation(&catalog, NEW, OLD, DEFAULT_PRICE_UNIT, DEFAULT_SIZE_UNIT).await);
    }

    #[tokio::test]
    async fn test_invalid_price_unit_is_absorbed_with_diagnostic() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let catalog = catalog(("16oz", "$4.00"), ("12oz", "$4.00"));
        let detected = detect_shrinkflation(&catalog, OLD, NEW, "XYZ", DEFAULT_SIZE_UNIT).await;

        assert!(!detected);
        let output = logs.contents();
        assert!(output.contains("Error detecting shrinkflation"));
        assert!(output.contains("XYZ"));
    }

    #[tokio::test]
    async fn test_try_detect_surfaces_invalid_size_unit() {
        let catalog = catalog(("16oz", "$4.00"), ("12oz", "$4.00"));

        let result = try_detect_shrinkflation(&catalog, OLD, NEW, DEFAULT_PRICE_UNIT, "stone").await;

        match result {
            Err(ShrinkError::InvalidUnitError { kind, code }) => {
                assert_eq!(kind, "size");
                assert_eq!(code, "stone");
            }
            other => panic!("expected InvalidUnitError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_page_is_absorbed() {
        let catalog = catalog(("16oz", "$4.00"), ("12oz", "$4.00"));

        let detected = detect_shrinkflation(
            &catalog,
            OLD,
            "https://example.com/discontinued",
            DEFAULT_PRICE_UNIT,
            DEFAULT_SIZE_UNIT,
        )
        .await;

        assert!(!detected);
    }

    #[tokio::test]
    async fn test_unparseable_page_is_absorbed() {
        let catalog = catalog(("16oz", "$4.00"), ("twelve", "$4.00"));

        assert!(!detect_shrinkflation(&catalog, OLD, NEW, DEFAULT_PRICE_UNIT, DEFAULT_SIZE_UNIT).await);
    }
}
