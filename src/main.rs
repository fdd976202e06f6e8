use clap::Parser;
use slcsp::utils::{logger, validation::Validate};
use slcsp::{CliConfig, EtlEngine, LocalStorage, SlcspPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, None);

    tracing::info!("Starting slcsp CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.data_dir.clone());
    let output_root = storage.clone();
    let pipeline = SlcspPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ SLCSP resolution completed");
            eprintln!(
                "📁 Output saved to: {}",
                output_root.full_path(&output_path).display()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ SLCSP resolution failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
