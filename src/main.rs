use clap::Parser;
use shrinkwatch::utils::error::ErrorSeverity;
use shrinkwatch::utils::{logger, validation::Validate};
use shrinkwatch::{AppConfig, CliConfig, HttpFetcher, LocalStorage, ShrinkflationEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", cli.config);

    let mut config = match AppConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if !config.units_supported() {
        tracing::warn!(
            "⚠️ Unsupported units {}/{}: every comparison will report false",
            config.comparison.price_unit,
            config.comparison.size_unit
        );
    }

    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    let storage = LocalStorage::new(cli.data_dir.clone());
    let engine = ShrinkflationEngine::new(HttpFetcher::new(), storage, config)?;

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
