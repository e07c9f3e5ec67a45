use crate::config::toml_config::AppConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "shrinkwatch")]
#[command(about = "Detect shrinkflation between old and new product pages")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "shrinkwatch.toml")]
    pub config: String,

    /// Base directory for the cache and report files
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    #[arg(long)]
    pub cache_file: Option<String>,

    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub price_unit: Option<String>,

    #[arg(long)]
    pub size_unit: Option<String>,

    /// Number of products in the ranked listing
    #[arg(long)]
    pub top: Option<usize>,

    /// Do not fetch the ranking sites
    #[arg(long)]
    pub skip_ranking: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(cache_file) = &self.cache_file {
            config.cache.path = cache_file.clone();
        }
        if let Some(output) = &self.output {
            config.report.output_path = output.clone();
        }
        if let Some(price_unit) = &self.price_unit {
            config.comparison.price_unit = price_unit.clone();
        }
        if let Some(size_unit) = &self.size_unit {
            config.comparison.size_unit = size_unit.clone();
        }
        if let Some(top) = self.top {
            config.report.top_n = top;
        }
        if self.skip_ranking {
            config.sites.urls.clear();
        }
    }
}
