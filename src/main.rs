use clap::Parser;
use movie_eda::core::ConfigProvider;
use movie_eda::utils::{logger, validation::Validate};
use movie_eda::{load_eda, CliConfig, DatasetSource, EtlEngine, LocalStorage, MoviePipeline, OmdbClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting movie-eda CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if config.report_only {
        let source = DatasetSource::new(config.data_dir());
        if load_eda(&source, config.dataset()).is_none() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // 金鑰只在啟動時讀取一次，之後明確傳入查詢客戶端
    let lookup = match (&config.api_key, config.enrich_enabled()) {
        (Some(key), true) => Some(OmdbClient::new(config.omdb_endpoint(), key.clone())),
        _ => None,
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = MoviePipeline::new(storage, lookup, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Pipeline completed successfully!");
            println!("✅ Cleaned dataset saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Pipeline failed: {}", e);
            eprintln!("❌ {}", e);
            let exit_code = if e.is_config_error() { 1 } else { 2 };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
