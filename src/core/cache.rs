//! Flat-file cache of URL -> (size, price).
//!
//! Every `lookup` loads the whole file and every `store` rewrites it. There is
//! no locking: only one process may use a given cache file at a time.

use crate::domain::model::SizePrice;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ShrinkError};
use std::collections::BTreeMap;

pub type CacheMap = BTreeMap<String, SizePrice>;

pub struct ProductCache<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> ProductCache<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    /// Read the full map. A missing file is an empty cache.
    pub async fn load(&self) -> Result<CacheMap> {
        match self.storage.read_file(&self.path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(ShrinkError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No cache file at {}, starting empty", self.path);
                Ok(CacheMap::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn lookup(&self, url: &str) -> Result<Option<SizePrice>> {
        let cache = self.load().await?;
        Ok(cache.get(url).copied())
    }

    /// Upsert `pair` and persist the entire map.
    ///
    /// Non-finite values would serialize as `null` and make the whole file unreadable,
    /// so they are rejected before anything is written.
    pub async fn store(&self, url: &str, pair: SizePrice) -> Result<()> {
        if !(pair.size().is_finite() && pair.price().is_finite()) {
            return Err(ShrinkError::ParseError {
                field: "cache entry".to_string(),
                value: format!("{:?}", pair),
            });
        }

        let mut cache = self.load().await?;
        cache.insert(url.to_string(), pair);

        let data = serde_json::to_vec_pretty(&cache)?;
        self.storage.write_file(&self.path, &data).await?;
        tracing::debug!("Cached {} -> {:?} ({} entries)", url, pair, cache.len());
        Ok(())
    }
}
