use clap::Parser;
use movie_eda::core::ConfigProvider;
use movie_eda::utils::{logger, validation::Validate};
use movie_eda::{EtlEngine, LocalStorage, MoviePipeline, OmdbClient, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-eda")]
#[command(about = "Movie dataset cleaning driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "movie-eda.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the OMDb enabled flag from config
    #[arg(long)]
    enrich: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based movie-eda");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(enrich) = args.enrich {
        config.omdb.enabled = Some(enrich);
        tracing::info!("🔧 OMDb enrichment overridden to: {}", enrich);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let lookup = match (config.api_key(), config.enrich_enabled()) {
        (Some(key), true) => Some(match config.timeout() {
            Some(timeout) => OmdbClient::with_timeout(config.omdb_endpoint(), key, timeout)?,
            None => OmdbClient::new(config.omdb_endpoint(), key),
        }),
        _ => None,
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = MoviePipeline::new(storage, lookup, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Cleaned dataset saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Pipeline failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(if e.is_config_error() { 1 } else { 2 });
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let columns = config.enrich_columns();
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("   Dataset: {} (in {})", config.dataset(), config.data_dir());
    tracing::info!("   Output: {}", config.output_path());
    tracing::info!(
        "   Year column: {}",
        config.year_column().unwrap_or("(none)")
    );
    tracing::info!(
        "   Budget column: {}",
        config.budget_column().unwrap_or("(none)")
    );
    if config.enrich_enabled() {
        tracing::info!("   OMDb endpoint: {}", config.omdb_endpoint());
        tracing::info!("   Fill columns: {}", columns.targets.join(", "));
    } else {
        tracing::info!("   OMDb enrichment: disabled");
    }
}
