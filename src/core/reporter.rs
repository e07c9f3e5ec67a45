use crate::core::catalog::ProductCatalog;
use crate::core::comparator::detect_shrinkflation;
use crate::domain::model::{ProductPair, ReportRow};
use crate::domain::ports::{Fetcher, Storage};
use crate::utils::error::{Result, ShrinkError};

/// Writes one CSV row per product pair. The report file is replaced on every run.
pub struct Reporter<S: Storage> {
    storage: S,
    output_path: String,
}

impl<S: Storage> Reporter<S> {
    pub fn new(storage: S, output_path: impl Into<String>) -> Self {
        Self {
            storage,
            output_path: output_path.into(),
        }
    }

    pub async fn compare_all<F: Fetcher, C: Storage>(
        &self,
        catalog: &ProductCatalog<F, C>,
        pairs: &[ProductPair],
        price_unit: &str,
        size_unit: &str,
    ) -> Vec<ReportRow> {
        let mut rows = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let detected =
                detect_shrinkflation(catalog, &pair.old, &pair.new, price_unit, size_unit).await;
            if detected {
                tracing::info!("📉 Shrinkflation detected: {} -> {}", pair.old, pair.new);
            }
            rows.push(ReportRow {
                old_product: pair.old.clone(),
                new_product: pair.new.clone(),
                shrinkflation_detected: detected,
            });
        }
        rows
    }

    pub fn render(rows: &[ReportRow]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        // 空報表也要有標題列
        if rows.is_empty() {
            writer.write_record(["Old Product", "New Product", "Shrinkflation Detected"])?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| ShrinkError::IoError(e.into_error()))
    }

    /// Compare every pair in order and write the report. Returns the output path.
    pub async fn write_report<F: Fetcher, C: Storage>(
        &self,
        catalog: &ProductCatalog<F, C>,
        pairs: &[ProductPair],
        price_unit: &str,
        size_unit: &str,
    ) -> Result<String> {
        let rows = self.compare_all(catalog, pairs, price_unit, size_unit).await;
        let data = Self::render(&rows)?;

        tracing::debug!("Writing {} report rows to {}", rows.len(), self.output_path);
        self.storage.write_file(&self.output_path, &data).await?;
        Ok(self.output_path.clone())
    }
}
