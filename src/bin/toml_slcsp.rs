use anyhow::Context;
use clap::Parser;
use slcsp::adapters::csv_records::parse_rows;
use slcsp::config::toml_config::TomlConfig;
use slcsp::core::ConfigProvider;
use slcsp::domain::model::{CountyRow, PlanRow, QueryRow};
use slcsp::utils::{logger, validation::Validate};
use slcsp::{EtlEngine, LocalStorage, PlanCatalog, RateAreaIndex, SlcspPipeline};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-slcsp")]
#[command(about = "SLCSP resolution driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "slcsp.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Load and index the inputs without writing any output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.log_format() == Some("json") {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting TOML-based SLCSP resolution");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        return perform_dry_run(&config);
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.data_dir().to_string());
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    eprintln!("📋 Configuration Summary:");
    eprintln!("  Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        eprintln!("  Description: {}", description);
    }
    eprintln!("  Data dir: {}", config.data_dir());
    eprintln!("  ZIP/rate areas: {}", config.zips_file());
    eprintln!("  Plans: {}", config.plans_file());
    eprintln!("  Queries: {}", config.queries_file());
    eprintln!("  Output: {}", config.output_path());
    eprintln!("  Formats: {}", config.output_formats().join(", "));

    if args.dry_run {
        eprintln!("  🔍 DRY RUN MODE ENABLED");
    }

    eprintln!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let data_dir = Path::new(config.data_dir());
    let read = |name: &str| {
        let path = data_dir.join(name);
        std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    };

    let counties: Vec<CountyRow> = parse_rows(config.zips_file(), &read(config.zips_file())?)
        .context("Failed to parse ZIP/rate-area file")?;
    let plans: Vec<PlanRow> = parse_rows(config.plans_file(), &read(config.plans_file())?)
        .context("Failed to parse plan file")?;
    let queries: Vec<QueryRow> = parse_rows(config.queries_file(), &read(config.queries_file())?)
        .context("Failed to parse query file")?;

    let index = RateAreaIndex::build(counties);
    let catalog = PlanCatalog::build(config.plans_file(), plans)
        .context("Failed to build plan catalog")?;

    eprintln!("🔍 Dry Run Analysis:");
    eprintln!("  ZIP codes indexed: {}", index.len());
    eprintln!("  Plans catalogued: {}", catalog.len());
    eprintln!("  Queries to resolve: {}", queries.len());
    eprintln!(
        "  Query ZIP codes missing from the index: {}",
        queries
            .iter()
            .filter(|q| index.lookup(&q.zipcode).is_none())
            .count()
    );
    eprintln!();
    eprintln!("✅ Dry run analysis complete.");

    Ok(())
}
