use crate::core::comparator::{PriceUnit, SizeUnit, DEFAULT_PRICE_UNIT, DEFAULT_SIZE_UNIT};
use crate::core::ranking::DEFAULT_TOP_N;
use crate::domain::model::ProductPair;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ShrinkError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATABASE: &str = "default_database_name";
pub const DEFAULT_CACHE_PATH: &str = "product_cache.json";
pub const DEFAULT_REPORT_PATH: &str = "results.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub settings: SettingsConfig,
    pub cache: CacheConfig,
    pub report: ReportConfig,
    pub comparison: ComparisonConfig,
    pub sites: SitesConfig,
    pub pairs: Vec<ProductPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Read and logged; nothing else uses it yet.
    pub database: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_CACHE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: String,
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_REPORT_PATH.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub price_unit: String,
    pub size_unit: String,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            price_unit: DEFAULT_PRICE_UNIT.to_string(),
            size_unit: DEFAULT_SIZE_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    pub urls: Vec<String>,
}

/// Pairs compared when the configuration lists none.
pub fn default_pairs() -> Vec<ProductPair> {
    (1..=3)
        .map(|i| {
            ProductPair::new(
                format!("https://example.com/product{}/old", i),
                format!("https://example.com/product{}/new", i),
            )
        })
        .collect()
}

impl AppConfig {
    /// 從 TOML 檔案載入配置，檔案不存在時使用預設值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default().with_default_pairs());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self = toml::from_str(&processed_content).map_err(|e| ShrinkError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        Ok(config.with_default_pairs())
    }

    fn with_default_pairs(mut self) -> Self {
        if self.pairs.is_empty() {
            self.pairs = default_pairs();
        }
        self
    }

    /// 替換環境變數 (例如 ${PRODUCT_HOST})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShrinkError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("settings.database", &self.settings.database)?;
        validation::validate_path("cache.path", &self.cache.path)?;
        validation::validate_path("report.output_path", &self.report.output_path)?;

        for (field, code) in [
            ("comparison.price_unit", &self.comparison.price_unit),
            ("comparison.size_unit", &self.comparison.size_unit),
        ] {
            validation::validate_non_empty_string(field, code)?;
        }

        for pair in &self.pairs {
            validation::validate_url("pairs.old", &pair.old)?;
            validation::validate_url("pairs.new", &pair.new)?;
        }

        for url in &self.sites.urls {
            validation::validate_url("sites.urls", url)?;
        }

        Ok(())
    }

    /// Whether the configured unit codes are in the factor tables. Unknown
    /// codes are allowed through; the comparator reports every pair as false.
    pub fn units_supported(&self) -> bool {
        self.comparison.price_unit.parse::<PriceUnit>().is_ok()
            && self.comparison.size_unit.parse::<SizeUnit>().is_ok()
    }
}

impl ConfigProvider for AppConfig {
    fn database(&self) -> &str {
        &self.settings.database
    }

    fn cache_path(&self) -> &str {
        &self.cache.path
    }

    fn report_path(&self) -> &str {
        &self.report.output_path
    }

    fn price_unit(&self) -> &str {
        &self.comparison.price_unit
    }

    fn size_unit(&self) -> &str {
        &self.comparison.size_unit
    }

    fn product_pairs(&self) -> &[ProductPair] {
        &self.pairs
    }

    fn site_urls(&self) -> &[String] {
        &self.sites.urls
    }

    fn top_n(&self) -> usize {
        self.report.top_n
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
