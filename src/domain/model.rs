use serde::{Deserialize, Serialize};
use std::fmt;

/// A scraped product page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub url: String,
    pub name: String,
    pub size: f64,
    pub price: f64,
    pub units: String,
}

impl Product {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn size_price(&self) -> SizePrice {
        SizePrice::new(self.size, self.price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}) - ${}",
            self.name, self.size, self.units, self.price
        )
    }
}

/// Cached (size, price) pair. Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizePrice(pub f64, pub f64);

impl SizePrice {
    pub fn new(size: f64, price: f64) -> Self {
        Self(size, price)
    }

    pub fn size(&self) -> f64 {
        self.0
    }

    pub fn price(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPair {
    pub old: String,
    pub new: String,
}

impl ProductPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Old Product")]
    pub old_product: String,
    #[serde(rename = "New Product")]
    pub new_product: String,
    #[serde(rename = "Shrinkflation Detected")]
    pub shrinkflation_detected: bool,
}
